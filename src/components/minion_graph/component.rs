//! Leptos component hosting a rendered minion graph.
//!
//! The component owns a `div` container. Whenever the `data` signal changes
//! the container is cleared and the graph is rendered again with the dagre
//! layout. Hover changes wake a frame loop that advances the radius
//! transitions until they settle.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;

use super::config::GraphConfig;
use super::dom::Document;
use super::error::Result;
use super::layout::DagreLayout;
use super::render::{GraphRenderer, RenderSession};
use super::types::GraphData;
use super::web::{FrameLoop, WebDocument};

/// A render and the frame loop driving its transitions.
struct MountedGraph {
	_frames: FrameLoop,
	_session: Rc<RenderSession<WebDocument>>,
}

fn mount(
	doc: &WebDocument,
	container: &web_sys::Element,
	data: &GraphData,
	config: &GraphConfig,
) -> Result<MountedGraph> {
	doc.release_listeners();
	doc.clear(container)?;

	let renderer = GraphRenderer::new(doc.clone(), DagreLayout, config.clone());
	let session = Rc::new(renderer.render_into(container, data)?);
	let ticking = session.clone();
	let frames = FrameLoop::start(move |dt| match ticking.tick(dt) {
		Ok(running) => running,
		Err(e) => {
			warn!("minion-graph: transition frame failed: {e}");
			false
		}
	})?;
	session.controller.borrow_mut().set_on_change(frames.waker());
	Ok(MountedGraph {
		_frames: frames,
		_session: session,
	})
}

/// Renders `data` as an interactive layered graph.
///
/// The graph is sized to the container, which fills its parent. Set
/// `fullscreen = true` to fill the viewport instead.
#[component]
pub fn MinionGraphView(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: GraphConfig,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let mounted: Rc<RefCell<Option<MountedGraph>>> = Rc::new(RefCell::new(None));
	let doc = WebDocument::new();

	Effect::new(move |_| {
		let graph = data.get();
		let Some(container) = container_ref.get() else {
			return;
		};
		let doc = match &doc {
			Ok(doc) => doc,
			Err(e) => {
				warn!("minion-graph: {e}");
				return;
			}
		};
		let container: web_sys::Element = container.into();

		// Stop the previous frame loop before its elements go away.
		mounted.borrow_mut().take();
		match mount(doc, &container, &graph, &config) {
			Ok(current) => *mounted.borrow_mut() = Some(current),
			Err(e) => warn!("minion-graph: render failed: {e}"),
		}
	});

	let style = if fullscreen {
		"width: 100vw; height: 100vh;"
	} else {
		"width: 100%; height: 100%;"
	};
	view! { <div node_ref=container_ref class="minion-graph-container" style=style /> }
}
