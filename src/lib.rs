//! minion-graph: Interactive layered graph visualization of cluster minions.
//!
//! This crate provides a WASM-based component that renders minions as an SVG
//! graph laid out in ranks, with role labels, hover details, and pan/zoom.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::minion_graph::{
	EdgeMap, GraphConfig, GraphData, GraphEdge, GraphError, GraphNode, Minion, MinionGraphView,
	RoleMap, Roles,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("minion-graph: logging initialized");
}

/// Graph description embedded in the page.
///
/// Either `nodes` with `edges` (or `links`), or raw `minions` with an
/// `edge_map` from which the edges are derived. Both may be given; their
/// nodes and edges are concatenated.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PagePayload {
	pub nodes: Vec<GraphNode>,
	#[serde(alias = "links")]
	pub edges: Vec<GraphEdge>,
	pub minions: Vec<Minion>,
	pub edge_map: EdgeMap,
	pub role_map: RoleMap,
	pub config: GraphConfig,
}

impl PagePayload {
	pub fn parse(json: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Merges both input forms and replaces role codes with display labels.
	pub fn into_parts(self) -> (GraphData, GraphConfig) {
		let mut data = GraphData {
			nodes: self.nodes,
			edges: self.edges,
		};
		if !self.minions.is_empty() {
			let inventory = GraphData::from_minions(&self.minions, &self.edge_map);
			data.nodes.extend(inventory.nodes);
			data.edges.extend(inventory.edges);
		}
		self.role_map.apply(&mut data.nodes);
		(data, self.config)
	}
}

/// Load the payload from a script element with id="graph-data".
fn load_payload() -> Option<PagePayload> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match PagePayload::parse(&json_text) {
		Ok(payload) => {
			info!(
				"minion-graph: loaded {} nodes, {} edges, {} minions",
				payload.nodes.len(),
				payload.edges.len(),
				payload.minions.len()
			);
			Some(payload)
		}
		Err(e) => {
			warn!("minion-graph: {e}");
			None
		}
	}
}

/// Main application component.
/// Loads the graph payload from the DOM and renders the minion graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let (graph_data, config) = load_payload().unwrap_or_default().into_parts();
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Minion Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<MinionGraphView data=graph_signal config=config fullscreen=true />
			<div class="graph-overlay">
				<h1>"Minions"</h1>
				<p class="subtitle">"Hover a node for details. Scroll to zoom. Drag to pan."</p>
			</div>
		</div>
	}
}
