//! SVG construction for the minion graph.
//!
//! Rendering builds the element tree in passes:
//! 1. `svg.minion-graph > g.zoom-container > g` root with gradient `defs`
//! 2. Node groups (`g.node`) positioned at their layout centres, then the node hook
//! 3. Edge groups (`g.edgePath`) with their routed paths, then the edge hook
//! 4. The post-render hook, two-line node labels, pan/zoom, and the initial fit
//!
//! Decoration happens through [`DrawHooks`]. [`MinionDecorations`] is the
//! hook set used for minion graphs: circles with gradient fills and hover
//! handlers on nodes, source attribution on edges, and the arrowhead marker.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use super::config::GraphConfig;
use super::dom::{Document, Namespace, PointerKind};
use super::error::{GraphError, Result};
use super::interaction::{EDGE_PATH_CLASS, InteractionController, SOURCE_NODE_ATTR};
use super::layout::{Layout, LayoutEngine, LayoutOptions, path_data};
use super::model::{EdgeId, GraphModel, ModelEdge};
use super::theme::{MarkerStyle, RadialGradient, Theme};
use super::tooltip::TooltipPresenter;
use super::types::{GraphData, GraphNode};
use super::viewport::{ScaleExtent, ViewTransform, ViewportFitter, ZoomBehavior};

/// Attribute carrying the node id on node groups.
pub const NODE_ID_ATTR: &str = "node-id";
/// Attribute carrying the edge identity on edge groups.
pub const EDGE_ID_ATTR: &str = "edge-id";

/// Extension points invoked while the default shapes are drawn.
pub trait DrawHooks<D: Document> {
	/// Called once the group for `node` exists and is positioned.
	fn after_node(&mut self, _doc: &D, _group: &D::Element, _node: &GraphNode) -> Result<()> {
		Ok(())
	}

	/// Called once the group and path for `edge` exist.
	fn after_edge(&mut self, _doc: &D, _group: &D::Element, _edge: ModelEdge<'_>) -> Result<()> {
		Ok(())
	}

	/// Called after every node and edge has been drawn.
	fn post_render(&mut self, _doc: &D, _root: &D::Element, _model: &GraphModel) -> Result<()> {
		Ok(())
	}
}

/// Elements produced for nodes and edges, in model order.
pub struct DrawnElements<E> {
	pub nodes: Vec<(String, E)>,
	pub edges: Vec<(EdgeId, E)>,
}

/// Draws edge paths and positioned node groups under `root`.
pub fn draw_layout<D: Document, H: DrawHooks<D>>(
	doc: &D,
	root: &D::Element,
	model: &GraphModel,
	layout: &Layout,
	hooks: &mut H,
) -> Result<DrawnElements<D::Element>> {
	// Edges sit beneath nodes; nodes are populated first.
	let edge_layer = doc.append_new(root, Namespace::Svg, "g")?;
	doc.set_class(&edge_layer, "edgePaths", true)?;
	let node_layer = doc.append_new(root, Namespace::Svg, "g")?;
	doc.set_class(&node_layer, "nodes", true)?;

	let mut nodes = Vec::with_capacity(model.node_count());
	for node in model.nodes() {
		let placement = layout.node(&node.id)?;
		let group = doc.append_new(&node_layer, Namespace::Svg, "g")?;
		doc.set_class(&group, "node", true)?;
		doc.set_attribute(
			&group,
			"transform",
			&format!("translate({},{})", placement.x, placement.y),
		)?;
		hooks.after_node(doc, &group, node)?;
		nodes.push((node.id.clone(), group));
	}

	let mut edges = Vec::with_capacity(model.edge_count());
	for edge in model.edges() {
		let group = doc.append_new(&edge_layer, Namespace::Svg, "g")?;
		doc.set_class(&group, EDGE_PATH_CLASS, true)?;
		doc.set_attribute(&group, EDGE_ID_ATTR, &edge.id.to_string())?;
		let path = doc.append_new(&group, Namespace::Svg, "path")?;
		doc.set_attributes(
			&path,
			&[
				("d", &path_data(layout.edge_points(edge.id))),
				("marker-end", "url(#arrowhead)"),
			],
		)?;
		hooks.after_edge(doc, &group, edge)?;
		edges.push((edge.id, group));
	}

	hooks.post_render(doc, root, model)?;
	Ok(DrawnElements { nodes, edges })
}

/// Appends a `radialGradient` for `gradient` to `defs`.
pub fn append_gradient<D: Document>(
	doc: &D,
	defs: &D::Element,
	gradient: &RadialGradient,
) -> Result<()> {
	let el = doc.append_new(defs, Namespace::Svg, "radialGradient")?;
	doc.set_attributes(
		&el,
		&[
			("id", gradient.id),
			("cx", &format!("{}%", gradient.cx)),
			("cy", &format!("{}%", gradient.cy)),
			("r", &format!("{}%", gradient.r)),
		],
	)?;
	for stop in &gradient.stops {
		let stop_el = doc.append_new(&el, Namespace::Svg, "stop")?;
		doc.set_attributes(
			&stop_el,
			&[
				("stop-color", &stop.color.to_css()),
				("offset", &format!("{}%", stop.offset)),
			],
		)?;
	}
	Ok(())
}

/// Adds the arrowhead marker to `defs` unless `root` already holds one.
///
/// Returns whether a marker was created.
pub fn ensure_arrowhead<D: Document>(
	doc: &D,
	root: &D::Element,
	defs: &D::Element,
	marker: &MarkerStyle,
) -> Result<bool> {
	if doc.find_by_id(root, marker.id)?.is_some() {
		return Ok(false);
	}
	let el = doc.append_new(defs, Namespace::Svg, "marker")?;
	doc.set_attributes(
		&el,
		&[
			("id", marker.id),
			("viewBox", marker.view_box),
			("refX", &marker.ref_x.to_string()),
			("refY", &marker.ref_y.to_string()),
			("markerUnits", "strokeWidth"),
			("markerWidth", &marker.width.to_string()),
			("markerHeight", &marker.height.to_string()),
			("orient", "auto"),
			("style", &format!("fill: {}", marker.fill.to_css())),
		],
	)?;
	let path = doc.append_new(&el, Namespace::Svg, "path")?;
	doc.set_attribute(&path, "d", marker.path)?;
	Ok(true)
}

/// Writes the id line and the roles line beneath each node.
pub fn label_nodes<D: Document>(
	doc: &D,
	nodes: &[(String, D::Element)],
	model: &GraphModel,
	config: &GraphConfig,
) -> Result<()> {
	let dx = config.label_dx.to_string();
	for (id, group) in nodes {
		let node = model.lookup(id)?;
		doc.set_attribute(group, NODE_ID_ATTR, id)?;

		let mut dy = config.label_dy;
		let id_text = doc.append_new(group, Namespace::Svg, "text")?;
		doc.set_class(&id_text, "node-id", true)?;
		doc.set_attributes(&id_text, &[("dx", &dx), ("dy", &dy.to_string())])?;
		doc.set_text(&id_text, &node.id)?;

		dy += config.label_line_space;
		let roles_text = doc.append_new(group, Namespace::Svg, "text")?;
		doc.set_class(&roles_text, "node-roles", true)?;
		doc.set_attributes(&roles_text, &[("dx", &dx), ("dy", &dy.to_string())])?;
		doc.set_text(&roles_text, &node.roles.to_string())?;
	}
	Ok(())
}

/// Hooks decorating minion graphs.
pub struct MinionDecorations<D: Document> {
	pub radius: f64,
	pub theme: Theme,
	pub defs: D::Element,
	pub controller: Rc<RefCell<InteractionController<D>>>,
}

impl<D: Document> DrawHooks<D> for MinionDecorations<D> {
	fn after_node(&mut self, doc: &D, group: &D::Element, node: &GraphNode) -> Result<()> {
		let circle = doc.append_new(group, Namespace::Svg, "circle")?;
		doc.set_attributes(
			&circle,
			&[
				("cx", "0"),
				("cy", "0"),
				("r", &self.radius.to_string()),
				("fill", &self.theme.node_base.fill_url()),
			],
		)?;
		self.controller
			.borrow_mut()
			.register(&node.id, group.clone(), circle);
		InteractionController::bind_hover(&self.controller, doc, &node.id, group)
	}

	fn after_edge(&mut self, doc: &D, group: &D::Element, edge: ModelEdge<'_>) -> Result<()> {
		doc.set_attribute(group, SOURCE_NODE_ATTR, edge.source)
	}

	fn post_render(&mut self, doc: &D, root: &D::Element, model: &GraphModel) -> Result<()> {
		if model.is_directed() {
			ensure_arrowhead(doc, root, &self.defs, &self.theme.arrowhead)?;
		}
		Ok(())
	}
}

/// Everything produced by one render call.
pub struct RenderSession<D: Document> {
	pub svg: D::Element,
	/// Group holding the drawing; carries the view transform.
	pub root: D::Element,
	pub nodes: Vec<(String, D::Element)>,
	pub edges: Vec<(EdgeId, D::Element)>,
	pub model: Rc<GraphModel>,
	pub controller: Rc<RefCell<InteractionController<D>>>,
	pub zoom: Rc<RefCell<ZoomBehavior>>,
	/// Transform computed by the initial fit.
	pub initial: ViewTransform,
}

impl<D: Document> RenderSession<D> {
	/// Current view transform, including user pan/zoom.
	pub fn transform(&self) -> ViewTransform {
		self.zoom.borrow().transform()
	}

	/// Advances hover transitions. Returns whether any are still running.
	pub fn tick(&self, dt_ms: f64) -> Result<bool> {
		self.controller.borrow_mut().tick(dt_ms)
	}
}

/// Renders minion graphs into containers of a document.
pub struct GraphRenderer<D: Document, L: LayoutEngine> {
	doc: D,
	engine: L,
	config: GraphConfig,
	theme: Theme,
	tooltip: Rc<RefCell<TooltipPresenter<D>>>,
}

impl<D: Document, L: LayoutEngine> GraphRenderer<D, L> {
	pub fn new(doc: D, engine: L, config: GraphConfig) -> Self {
		let tooltip = Rc::new(RefCell::new(TooltipPresenter::new(doc.clone(), &config)));
		Self {
			doc,
			engine,
			config,
			theme: Theme::default(),
			tooltip,
		}
	}

	/// Renders into the first element matching `selector`.
	pub fn render(&self, selector: &str, data: &GraphData) -> Result<RenderSession<D>> {
		let container = self
			.doc
			.query(selector)?
			.ok_or_else(|| GraphError::ContainerNotFound(selector.to_string()))?;
		self.render_into(&container, data)
	}

	/// Appends a new SVG for `data` to `container`, sized to the container.
	///
	/// Existing children are kept; clear the container first to replace a
	/// previous render.
	pub fn render_into(&self, container: &D::Element, data: &GraphData) -> Result<RenderSession<D>> {
		let doc = &self.doc;
		let model = Rc::new(GraphModel::build(&data.nodes, &data.edges)?);
		let (width, height) = doc.client_size(container);
		self.tooltip.borrow_mut().ensure_mounted()?;

		let svg = doc.append_new(container, Namespace::Svg, "svg")?;
		doc.set_class(&svg, "minion-graph", true)?;
		doc.set_attributes(
			&svg,
			&[("width", &width.to_string()), ("height", &height.to_string())],
		)?;
		let zoom_container = doc.append_new(&svg, Namespace::Svg, "g")?;
		doc.set_class(&zoom_container, "zoom-container", true)?;
		let root = doc.append_new(&zoom_container, Namespace::Svg, "g")?;

		let defs = doc.append_new(&root, Namespace::Svg, "defs")?;
		for gradient in self.theme.gradients() {
			append_gradient(doc, &defs, gradient)?;
		}

		let layout = self
			.engine
			.layout(&model, &LayoutOptions::from(&self.config))?;

		let controller = Rc::new(RefCell::new(InteractionController::new(
			doc.clone(),
			root.clone(),
			model.clone(),
			self.tooltip.clone(),
			&self.config,
			&self.theme,
		)));
		let mut hooks = MinionDecorations {
			radius: self.config.node_radius,
			theme: self.theme.clone(),
			defs,
			controller: controller.clone(),
		};
		let drawn = draw_layout(doc, &root, &model, &layout, &mut hooks)?;
		label_nodes(doc, &drawn.nodes, &model, &self.config)?;

		let extent = ScaleExtent::new(self.config.scale_extent_min, self.config.scale_extent_max);
		let zoom = Rc::new(RefCell::new(ZoomBehavior::new(extent)));
		bind_zoom(doc, &svg, &root, &zoom)?;

		let content = doc.bounding_box(&root)?;
		let initial = ViewportFitter::new(self.config.margin, extent).fit(content, width, height);
		doc.set_attribute(&root, "transform", &initial.to_svg())?;
		zoom.borrow_mut().seed(initial);

		info!(
			"minion-graph: rendered {} nodes, {} edges into {}x{} at {}",
			model.node_count(),
			model.edge_count(),
			width,
			height,
			initial.to_svg()
		);

		Ok(RenderSession {
			svg,
			root,
			nodes: drawn.nodes,
			edges: drawn.edges,
			model,
			controller,
			zoom,
			initial,
		})
	}
}

/// Wires wheel zoom and drag pan on `surface` to the transform of `root`.
fn bind_zoom<D: Document>(
	doc: &D,
	surface: &D::Element,
	root: &D::Element,
	zoom: &Rc<RefCell<ZoomBehavior>>,
) -> Result<()> {
	let apply = {
		let (doc, root) = (doc.clone(), root.clone());
		move |t: ViewTransform| {
			if let Err(e) = doc.set_attribute(&root, "transform", &t.to_svg()) {
				warn!("minion-graph: applying zoom failed: {e}");
			}
		}
	};

	let (zoom_wh, apply_wh) = (zoom.clone(), apply.clone());
	doc.listen(
		surface,
		PointerKind::Wheel,
		Box::new(move |ev| {
			let t = zoom_wh.borrow_mut().wheel(ev.local_x, ev.local_y, ev.delta_y);
			apply_wh(t);
		}),
	)?;

	let zoom_md = zoom.clone();
	doc.listen(
		surface,
		PointerKind::Down,
		Box::new(move |ev| zoom_md.borrow_mut().pan_start(ev.local_x, ev.local_y)),
	)?;

	let (zoom_mm, apply_mm) = (zoom.clone(), apply);
	doc.listen(
		surface,
		PointerKind::Move,
		Box::new(move |ev| {
			let moved = zoom_mm.borrow_mut().pan_move(ev.local_x, ev.local_y);
			if let Some(t) = moved {
				apply_mm(t);
			}
		}),
	)?;

	for kind in [PointerKind::Up, PointerKind::Leave] {
		let zoom_end = zoom.clone();
		doc.listen(
			surface,
			kind,
			Box::new(move |_| zoom_end.borrow_mut().pan_end()),
		)?;
	}
	Ok(())
}
