//! The document surface the graph is drawn into.
//!
//! Rendering, interaction and the tooltip only talk to the page through
//! [`Document`]. The browser build implements it with `web-sys`
//! (see `web::WebDocument`); anything else that can hold an element tree can
//! stand in for it.

use super::error::Result;
use super::viewport::BoundingBox;

/// XML namespace of a created element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Namespace {
	Html,
	Svg,
}

impl Namespace {
	pub fn uri(self) -> &'static str {
		match self {
			Namespace::Html => "http://www.w3.org/1999/xhtml",
			Namespace::Svg => "http://www.w3.org/2000/svg",
		}
	}
}

/// Pointer events the graph listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
	/// Pointer entered the element or one of its children.
	Over,
	/// Pointer left the element or one of its children.
	Out,
	Down,
	Move,
	Up,
	/// Pointer left the element entirely.
	Leave,
	Wheel,
}

impl PointerKind {
	pub fn event_name(self) -> &'static str {
		match self {
			PointerKind::Over => "mouseover",
			PointerKind::Out => "mouseout",
			PointerKind::Down => "mousedown",
			PointerKind::Move => "mousemove",
			PointerKind::Up => "mouseup",
			PointerKind::Leave => "mouseleave",
			PointerKind::Wheel => "wheel",
		}
	}
}

/// Pointer position and wheel delta delivered to handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
	/// Position relative to the page, used to place the tooltip.
	pub page_x: f64,
	pub page_y: f64,
	/// Position relative to the element the handler is attached to.
	pub local_x: f64,
	pub local_y: f64,
	/// Vertical wheel delta; zero for non-wheel events.
	pub delta_y: f64,
}

impl PointerEvent {
	pub fn at_page(x: f64, y: f64) -> Self {
		Self {
			page_x: x,
			page_y: y,
			..Self::default()
		}
	}
}

pub type PointerHandler = Box<dyn FnMut(PointerEvent)>;

/// DOM operations needed to draw and animate a graph.
pub trait Document: Clone + 'static {
	type Element: Clone + 'static;

	fn body(&self) -> Result<Self::Element>;

	/// First element matching a CSS selector anywhere in the page.
	fn query(&self, selector: &str) -> Result<Option<Self::Element>>;

	fn create(&self, ns: Namespace, tag: &str) -> Result<Self::Element>;

	fn append(&self, parent: &Self::Element, child: &Self::Element) -> Result<()>;

	fn set_attribute(&self, el: &Self::Element, name: &str, value: &str) -> Result<()>;

	fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;

	/// Element tag name. HTML documents report it upper-cased.
	fn tag_name(&self, el: &Self::Element) -> String;

	fn set_class(&self, el: &Self::Element, class: &str, enabled: bool) -> Result<()>;

	fn has_class(&self, el: &Self::Element, class: &str) -> bool;

	fn set_style(&self, el: &Self::Element, property: &str, value: &str) -> Result<()>;

	/// Replaces all children of `el` with a single text node.
	fn set_text(&self, el: &Self::Element, text: &str) -> Result<()>;

	/// Removes all children of `el`.
	fn clear(&self, el: &Self::Element) -> Result<()>;

	/// Descendants of `root` carrying `class`, optionally also an attribute
	/// with exactly the given value. Document order.
	fn find_all(
		&self,
		root: &Self::Element,
		class: &str,
		attr: Option<(&str, &str)>,
	) -> Result<Vec<Self::Element>>;

	fn find_by_id(&self, root: &Self::Element, id: &str) -> Result<Option<Self::Element>>;

	/// Laid-out width and height of `el`.
	fn client_size(&self, el: &Self::Element) -> (f64, f64);

	/// Geometry of an SVG element's rendered content in its own user space.
	fn bounding_box(&self, el: &Self::Element) -> Result<BoundingBox>;

	fn offset_width(&self, el: &Self::Element) -> f64;

	/// Registers `handler` for `kind` events on `el` for the page lifetime.
	fn listen(&self, el: &Self::Element, kind: PointerKind, handler: PointerHandler) -> Result<()>;

	/// Creates an element and appends it to `parent`.
	fn append_new(&self, parent: &Self::Element, ns: Namespace, tag: &str) -> Result<Self::Element> {
		let el = self.create(ns, tag)?;
		self.append(parent, &el)?;
		Ok(el)
	}

	fn set_attributes(&self, el: &Self::Element, attrs: &[(&str, &str)]) -> Result<()> {
		for (name, value) in attrs {
			self.set_attribute(el, name, value)?;
		}
		Ok(())
	}
}
