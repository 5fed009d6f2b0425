//! Browser implementation of [`Document`] on top of `web-sys`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{
	Element, HtmlElement, MouseEvent, Node, SvgElement, SvgGraphicsElement, WheelEvent,
};

use super::dom::{Document, Namespace, PointerEvent, PointerHandler, PointerKind};
use super::error::{GraphError, Result};
use super::viewport::BoundingBox;

fn dom_error(context: &str, err: JsValue) -> GraphError {
	GraphError::Dom(format!("{context}: {err:?}"))
}

type Listener = Closure<dyn FnMut(MouseEvent)>;

/// The page document. Clones share the registered listeners.
#[derive(Clone)]
pub struct WebDocument {
	document: web_sys::Document,
	listeners: Rc<RefCell<Vec<Listener>>>,
}

impl WebDocument {
	/// Document of the current window.
	pub fn new() -> Result<Self> {
		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or_else(|| GraphError::Dom("no window document".into()))?;
		Ok(Self::from_document(document))
	}

	pub fn from_document(document: web_sys::Document) -> Self {
		Self {
			document,
			listeners: Rc::new(RefCell::new(Vec::new())),
		}
	}

	/// Drops every listener registered through this document.
	///
	/// Only call once the elements they were attached to are gone.
	pub fn release_listeners(&self) {
		self.listeners.borrow_mut().clear();
	}
}

impl Document for WebDocument {
	type Element = Element;

	fn body(&self) -> Result<Element> {
		self.document
			.body()
			.map(Element::from)
			.ok_or_else(|| GraphError::Dom("document has no body".into()))
	}

	fn query(&self, selector: &str) -> Result<Option<Element>> {
		self.document
			.query_selector(selector)
			.map_err(|e| dom_error("invalid selector", e))
	}

	fn create(&self, ns: Namespace, tag: &str) -> Result<Element> {
		self.document
			.create_element_ns(Some(ns.uri()), tag)
			.map_err(|e| dom_error("creating element", e))
	}

	fn append(&self, parent: &Element, child: &Element) -> Result<()> {
		parent
			.append_child(child)
			.map(|_| ())
			.map_err(|e| dom_error("appending element", e))
	}

	fn set_attribute(&self, el: &Element, name: &str, value: &str) -> Result<()> {
		el.set_attribute(name, value)
			.map_err(|e| dom_error("setting attribute", e))
	}

	fn attribute(&self, el: &Element, name: &str) -> Option<String> {
		el.get_attribute(name)
	}

	fn tag_name(&self, el: &Element) -> String {
		el.tag_name()
	}

	fn set_class(&self, el: &Element, class: &str, enabled: bool) -> Result<()> {
		el.class_list()
			.toggle_with_force(class, enabled)
			.map(|_| ())
			.map_err(|e| dom_error("toggling class", e))
	}

	fn has_class(&self, el: &Element, class: &str) -> bool {
		el.class_list().contains(class)
	}

	fn set_style(&self, el: &Element, property: &str, value: &str) -> Result<()> {
		let style = if let Some(html) = el.dyn_ref::<HtmlElement>() {
			html.style()
		} else if let Some(svg) = el.dyn_ref::<SvgElement>() {
			svg.style()
		} else {
			return Err(GraphError::Dom(format!("<{}> has no style", el.tag_name())));
		};
		style
			.set_property(property, value)
			.map_err(|e| dom_error("setting style", e))
	}

	fn set_text(&self, el: &Element, text: &str) -> Result<()> {
		el.set_text_content(Some(text));
		Ok(())
	}

	fn clear(&self, el: &Element) -> Result<()> {
		el.set_text_content(None);
		Ok(())
	}

	fn find_all(
		&self,
		root: &Element,
		class: &str,
		attr: Option<(&str, &str)>,
	) -> Result<Vec<Element>> {
		let list = root.get_elements_by_class_name(class);
		let mut found = Vec::with_capacity(list.length() as usize);
		for i in 0..list.length() {
			let Some(el) = list.item(i) else {
				continue;
			};
			let matches = match attr {
				Some((name, value)) => el.get_attribute(name).as_deref() == Some(value),
				None => true,
			};
			if matches {
				found.push(el);
			}
		}
		Ok(found)
	}

	fn find_by_id(&self, root: &Element, id: &str) -> Result<Option<Element>> {
		Ok(self
			.document
			.get_element_by_id(id)
			.filter(|el| {
				let node: &Node = el;
				root.contains(Some(node))
			}))
	}

	fn client_size(&self, el: &Element) -> (f64, f64) {
		(el.client_width() as f64, el.client_height() as f64)
	}

	fn bounding_box(&self, el: &Element) -> Result<BoundingBox> {
		let graphics = el
			.dyn_ref::<SvgGraphicsElement>()
			.ok_or_else(|| GraphError::Dom(format!("<{}> is not an SVG graphic", el.tag_name())))?;
		let rect = graphics
			.get_b_box()
			.map_err(|e| dom_error("measuring content", e))?;
		Ok(BoundingBox::new(
			rect.x() as f64,
			rect.y() as f64,
			rect.width() as f64,
			rect.height() as f64,
		))
	}

	fn offset_width(&self, el: &Element) -> f64 {
		el.dyn_ref::<HtmlElement>()
			.map(|html| html.offset_width() as f64)
			.unwrap_or(0.0)
	}

	fn listen(&self, el: &Element, kind: PointerKind, mut handler: PointerHandler) -> Result<()> {
		let target = el.clone();
		let listener: Listener = Closure::new(move |ev: MouseEvent| {
			let rect = target.get_bounding_client_rect();
			let delta_y = match ev.dyn_ref::<WheelEvent>() {
				Some(wheel) => {
					wheel.prevent_default();
					wheel.delta_y()
				}
				None => 0.0,
			};
			handler(PointerEvent {
				page_x: ev.page_x() as f64,
				page_y: ev.page_y() as f64,
				local_x: ev.client_x() as f64 - rect.left(),
				local_y: ev.client_y() as f64 - rect.top(),
				delta_y,
			});
		});
		el.add_event_listener_with_callback(kind.event_name(), listener.as_ref().unchecked_ref())
			.map_err(|e| dom_error("adding listener", e))?;
		self.listeners.borrow_mut().push(listener);
		Ok(())
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(callback: &FrameCallback) -> Option<i32> {
	let window = web_sys::window()?;
	let cb = callback.borrow();
	window
		.request_animation_frame(cb.as_ref()?.as_ref().unchecked_ref())
		.ok()
}

/// Calls a function on animation frames while it reports more work.
///
/// The loop starts idle. [`FrameLoop::wake`] (or a [`FrameLoop::waker`])
/// schedules the next frame; the loop goes idle again once the frame
/// function returns `false`. Frames stop when the loop is dropped.
pub struct FrameLoop {
	callback: FrameCallback,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	/// Prepares to call `frame` with the milliseconds since the previous frame.
	///
	/// The first frame after waking gets `0.0`.
	pub fn start(mut frame: impl FnMut(f64) -> bool + 'static) -> Result<Self> {
		if web_sys::window().is_none() {
			return Err(GraphError::Dom("requestAnimationFrame unavailable".into()));
		}
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));
		let (callback_inner, pending_inner) = (Rc::downgrade(&callback), pending.clone());
		let mut last: Option<f64> = None;
		*callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			pending_inner.set(None);
			let dt = last.map_or(0.0, |prev| now - prev);
			if !frame(dt) {
				last = None;
				return;
			}
			last = Some(now);
			if let Some(callback) = callback_inner.upgrade() {
				pending_inner.set(request_frame(&callback));
			}
		}));
		Ok(Self { callback, pending })
	}

	/// Schedules a frame unless one is already pending.
	pub fn wake(&self) {
		wake(&self.callback, &self.pending);
	}

	/// A detached [`FrameLoop::wake`] that does nothing once the loop is dropped.
	pub fn waker(&self) -> impl Fn() + 'static {
		let (callback, pending) = (Rc::downgrade(&self.callback), self.pending.clone());
		move || {
			if let Some(callback) = callback.upgrade() {
				wake(&callback, &pending);
			}
		}
	}
}

fn wake(callback: &FrameCallback, pending: &Cell<Option<i32>>) {
	if pending.get().is_none() {
		pending.set(request_frame(callback));
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}
}
