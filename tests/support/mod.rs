//! In-memory document and fixed layout for driving the renderer natively.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use minion_graph::components::minion_graph::dom::{
	Document, Namespace, PointerEvent, PointerHandler, PointerKind,
};
use minion_graph::components::minion_graph::layout::{
	Layout, LayoutEngine, LayoutOptions, NodePlacement, Point,
};
use minion_graph::components::minion_graph::model::GraphModel;
use minion_graph::components::minion_graph::viewport::BoundingBox;
use minion_graph::components::minion_graph::{GraphError, Result};
use minion_graph::{GraphNode, Roles};

/// Handle to an element of a [`MockDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct El(usize);

#[derive(Debug)]
struct MockNode {
	tag: String,
	ns: Namespace,
	parent: Option<usize>,
	children: Vec<usize>,
	attrs: BTreeMap<String, String>,
	classes: Vec<String>,
	styles: BTreeMap<String, String>,
	text: String,
	size: (f64, f64),
	offset_width: f64,
}

type SharedHandler = Rc<RefCell<PointerHandler>>;

struct Tree {
	nodes: Vec<MockNode>,
	content_box: BoundingBox,
	handlers: Vec<(usize, PointerKind, SharedHandler)>,
}

impl Tree {
	fn node(&self, el: El) -> &MockNode {
		&self.nodes[el.0]
	}

	fn node_mut(&mut self, el: El) -> &mut MockNode {
		&mut self.nodes[el.0]
	}

	/// Descendants of `root` in document order, excluding `root`.
	fn descendants(&self, root: El) -> Vec<El> {
		let mut out = Vec::new();
		let mut stack: Vec<usize> = self.nodes[root.0].children.iter().rev().copied().collect();
		while let Some(i) = stack.pop() {
			out.push(El(i));
			stack.extend(self.nodes[i].children.iter().rev().copied());
		}
		out
	}
}

/// Element tree held in memory. Clones share the tree.
#[derive(Clone)]
pub struct MockDocument {
	tree: Rc<RefCell<Tree>>,
}

impl MockDocument {
	pub fn new() -> Self {
		let body = MockNode {
			tag: "body".into(),
			ns: Namespace::Html,
			parent: None,
			children: Vec::new(),
			attrs: BTreeMap::new(),
			classes: Vec::new(),
			styles: BTreeMap::new(),
			text: String::new(),
			size: (0.0, 0.0),
			offset_width: 0.0,
		};
		Self {
			tree: Rc::new(RefCell::new(Tree {
				nodes: vec![body],
				content_box: BoundingBox::default(),
				handlers: Vec::new(),
			})),
		}
	}

	/// Appends `div#id` of the given client size to the body.
	pub fn container(&self, id: &str, width: f64, height: f64) -> El {
		let body = self.body().unwrap();
		let div = self.append_new(&body, Namespace::Html, "div").unwrap();
		self.set_attribute(&div, "id", id).unwrap();
		self.tree.borrow_mut().node_mut(div).size = (width, height);
		div
	}

	/// Box reported for every measured element.
	pub fn set_content_box(&self, bbox: BoundingBox) {
		self.tree.borrow_mut().content_box = bbox;
	}

	pub fn set_offset_width(&self, el: El, width: f64) {
		self.tree.borrow_mut().node_mut(el).offset_width = width;
	}

	/// Invokes the handlers registered on `el` for `kind`.
	pub fn fire(&self, el: El, kind: PointerKind, event: PointerEvent) {
		let handlers: Vec<SharedHandler> = self
			.tree
			.borrow()
			.handlers
			.iter()
			.filter(|(target, k, _)| *target == el.0 && *k == kind)
			.map(|(_, _, h)| h.clone())
			.collect();
		for handler in handlers {
			let mut handler = handler.borrow_mut();
			(*handler)(event);
		}
	}

	pub fn handler_count(&self, el: El) -> usize {
		self.tree
			.borrow()
			.handlers
			.iter()
			.filter(|(target, _, _)| *target == el.0)
			.count()
	}

	pub fn tag(&self, el: El) -> String {
		self.tree.borrow().node(el).tag.clone()
	}

	pub fn namespace(&self, el: El) -> Namespace {
		self.tree.borrow().node(el).ns
	}

	pub fn text(&self, el: El) -> String {
		self.tree.borrow().node(el).text.clone()
	}

	pub fn style(&self, el: El, property: &str) -> Option<String> {
		self.tree.borrow().node(el).styles.get(property).cloned()
	}

	pub fn children(&self, el: El) -> Vec<El> {
		self.tree.borrow().node(el).children.iter().map(|&i| El(i)).collect()
	}

	/// Descendants of `root` with the given tag, in document order.
	pub fn by_tag(&self, root: El, tag: &str) -> Vec<El> {
		let tree = self.tree.borrow();
		tree.descendants(root)
			.into_iter()
			.filter(|&el| tree.node(el).tag == tag)
			.collect()
	}

	/// Texts of all descendants of `root` carrying `class`.
	pub fn texts_by_class(&self, root: El, class: &str) -> Vec<String> {
		self.find_all(&root, class, None)
			.unwrap()
			.into_iter()
			.map(|el| self.text(el))
			.collect()
	}
}

fn selector_matches(node: &MockNode, selector: &str) -> bool {
	if let Some(id) = selector.strip_prefix('#') {
		node.attrs.get("id").map(String::as_str) == Some(id)
	} else if let Some(class) = selector.strip_prefix('.') {
		node.classes.iter().any(|c| c == class)
	} else {
		node.tag == selector
	}
}

impl Document for MockDocument {
	type Element = El;

	fn body(&self) -> Result<El> {
		Ok(El(0))
	}

	fn query(&self, selector: &str) -> Result<Option<El>> {
		if selector.is_empty() {
			return Err(GraphError::Dom("empty selector".into()));
		}
		let tree = self.tree.borrow();
		Ok(tree
			.descendants(El(0))
			.into_iter()
			.find(|&el| selector_matches(tree.node(el), selector)))
	}

	fn create(&self, ns: Namespace, tag: &str) -> Result<El> {
		let mut tree = self.tree.borrow_mut();
		tree.nodes.push(MockNode {
			tag: tag.to_string(),
			ns,
			parent: None,
			children: Vec::new(),
			attrs: BTreeMap::new(),
			classes: Vec::new(),
			styles: BTreeMap::new(),
			text: String::new(),
			size: (0.0, 0.0),
			offset_width: 0.0,
		});
		Ok(El(tree.nodes.len() - 1))
	}

	fn append(&self, parent: &El, child: &El) -> Result<()> {
		let mut tree = self.tree.borrow_mut();
		if let Some(old) = tree.node(*child).parent {
			tree.nodes[old].children.retain(|&c| c != child.0);
		}
		tree.node_mut(*child).parent = Some(parent.0);
		tree.node_mut(*parent).children.push(child.0);
		Ok(())
	}

	fn set_attribute(&self, el: &El, name: &str, value: &str) -> Result<()> {
		self.tree
			.borrow_mut()
			.node_mut(*el)
			.attrs
			.insert(name.to_string(), value.to_string());
		Ok(())
	}

	fn attribute(&self, el: &El, name: &str) -> Option<String> {
		self.tree.borrow().node(*el).attrs.get(name).cloned()
	}

	fn tag_name(&self, el: &El) -> String {
		self.tag(*el)
	}

	fn set_class(&self, el: &El, class: &str, enabled: bool) -> Result<()> {
		let mut tree = self.tree.borrow_mut();
		let classes = &mut tree.node_mut(*el).classes;
		let present = classes.iter().any(|c| c == class);
		if enabled && !present {
			classes.push(class.to_string());
		} else if !enabled {
			classes.retain(|c| c != class);
		}
		Ok(())
	}

	fn has_class(&self, el: &El, class: &str) -> bool {
		self.tree.borrow().node(*el).classes.iter().any(|c| c == class)
	}

	fn set_style(&self, el: &El, property: &str, value: &str) -> Result<()> {
		self.tree
			.borrow_mut()
			.node_mut(*el)
			.styles
			.insert(property.to_string(), value.to_string());
		Ok(())
	}

	fn set_text(&self, el: &El, text: &str) -> Result<()> {
		self.clear(el)?;
		self.tree.borrow_mut().node_mut(*el).text = text.to_string();
		Ok(())
	}

	fn clear(&self, el: &El) -> Result<()> {
		let mut tree = self.tree.borrow_mut();
		let children = std::mem::take(&mut tree.node_mut(*el).children);
		for child in children {
			tree.nodes[child].parent = None;
		}
		tree.node_mut(*el).text.clear();
		Ok(())
	}

	fn find_all(&self, root: &El, class: &str, attr: Option<(&str, &str)>) -> Result<Vec<El>> {
		let tree = self.tree.borrow();
		Ok(tree
			.descendants(*root)
			.into_iter()
			.filter(|&el| {
				let node = tree.node(el);
				node.classes.iter().any(|c| c == class)
					&& attr.is_none_or(|(name, value)| {
						node.attrs.get(name).map(String::as_str) == Some(value)
					})
			})
			.collect())
	}

	fn find_by_id(&self, root: &El, id: &str) -> Result<Option<El>> {
		let tree = self.tree.borrow();
		Ok(tree
			.descendants(*root)
			.into_iter()
			.find(|&el| tree.node(el).attrs.get("id").map(String::as_str) == Some(id)))
	}

	fn client_size(&self, el: &El) -> (f64, f64) {
		self.tree.borrow().node(*el).size
	}

	fn bounding_box(&self, _el: &El) -> Result<BoundingBox> {
		Ok(self.tree.borrow().content_box)
	}

	fn offset_width(&self, el: &El) -> f64 {
		self.tree.borrow().node(*el).offset_width
	}

	fn listen(&self, el: &El, kind: PointerKind, handler: PointerHandler) -> Result<()> {
		self.tree
			.borrow_mut()
			.handlers
			.push((el.0, kind, Rc::new(RefCell::new(handler))));
		Ok(())
	}
}

/// Places nodes in a row 100 apart and routes edges straight between them.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedLayout;

impl LayoutEngine for FixedLayout {
	fn layout(&self, model: &GraphModel, options: &LayoutOptions) -> Result<Layout> {
		let mut layout = Layout::default();
		for (i, id) in model.node_ids().into_iter().enumerate() {
			layout.nodes.insert(
				id.to_string(),
				NodePlacement {
					x: 100.0 * i as f64 + options.node_width / 2.0,
					y: options.node_height / 2.0,
				},
			);
		}
		for edge in model.edges() {
			let from = layout.node(edge.source)?;
			let to = layout.node(edge.target)?;
			layout.edges.insert(
				edge.id,
				vec![Point { x: from.x, y: from.y }, Point { x: to.x, y: to.y }],
			);
		}
		Ok(layout)
	}
}

pub fn node(id: &str, roles: &[&str], cpu_model: &str, num_cpus: u32, memory: u64) -> GraphNode {
	GraphNode {
		id: id.into(),
		roles: Roles::Codes(roles.iter().map(|r| r.to_string()).collect()),
		cpu_model: cpu_model.into(),
		num_cpus,
		memory,
		os: None,
		cpu_arch: None,
	}
}
