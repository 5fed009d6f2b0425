//! Hover interaction for rendered nodes.
//!
//! Each node is either inactive (initial) or active. Pointer-over activates
//! a node: its group gains the `active` class, the circle switches to the
//! active gradient and grows to the active radius, every edge element whose
//! `source-node` attribute names the node is marked active, and the tooltip
//! shows the node's metadata. Pointer-out reverses all of it.
//!
//! Nodes are independent. Fast pointer movement may briefly leave two nodes
//! active; nothing forces a single active node.
//!
//! Radius changes are animated by [`RadiusTransition`]. A new target
//! supersedes the running transition from wherever it currently is, so a
//! leave halfway through growing shrinks back smoothly.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::warn;

use super::config::GraphConfig;
use super::dom::{Document, PointerEvent, PointerKind};
use super::error::{GraphError, Result};
use super::model::GraphModel;
use super::theme::Theme;
use super::tooltip::TooltipPresenter;

/// Class toggled on active nodes and edges.
pub const ACTIVE_CLASS: &str = "active";
/// Class of rendered edge groups.
pub const EDGE_PATH_CLASS: &str = "edgePath";
/// Attribute on edge groups naming the edge's source node.
pub const SOURCE_NODE_ATTR: &str = "source-node";

/// Hover state of a single node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeState {
	#[default]
	Inactive,
	Active,
}

/// Cubic ease-in-out over `t` in `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		let u = -2.0 * t + 2.0;
		1.0 - u * u * u / 2.0
	}
}

/// Eased animation of a circle radius towards a target.
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusTransition {
	from: f64,
	to: f64,
	elapsed_ms: f64,
	duration_ms: f64,
}

impl RadiusTransition {
	/// A transition already resting at `radius`.
	pub fn settled(radius: f64, duration_ms: f64) -> Self {
		Self {
			from: radius,
			to: radius,
			elapsed_ms: duration_ms,
			duration_ms,
		}
	}

	pub fn target(&self) -> f64 {
		self.to
	}

	pub fn current(&self) -> f64 {
		if self.duration_ms <= 0.0 || self.elapsed_ms >= self.duration_ms {
			return self.to;
		}
		let t = ease_cubic_in_out(self.elapsed_ms / self.duration_ms);
		self.from + (self.to - self.from) * t
	}

	pub fn is_running(&self) -> bool {
		self.elapsed_ms < self.duration_ms && self.from != self.to
	}

	/// Starts over from the current radius towards `to`.
	///
	/// Re-targeting to the value already being approached leaves the running
	/// transition untouched.
	pub fn retarget(&mut self, to: f64) {
		if to == self.to {
			return;
		}
		self.from = self.current();
		self.to = to;
		self.elapsed_ms = 0.0;
	}

	/// Advances by `dt_ms` and returns the new radius.
	pub fn advance(&mut self, dt_ms: f64) -> f64 {
		self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
		self.current()
	}
}

/// Per-node handles and state.
struct RenderedNode<E> {
	group: E,
	circle: E,
	state: NodeState,
	radius: RadiusTransition,
	/// Radius last written to the circle.
	drawn: f64,
}

/// Applies hover transitions to rendered nodes, their edges and the tooltip.
pub struct InteractionController<D: Document> {
	doc: D,
	root: D::Element,
	model: Rc<GraphModel>,
	tooltip: Rc<RefCell<TooltipPresenter<D>>>,
	nodes: HashMap<String, RenderedNode<D::Element>>,
	radius: f64,
	radius_active: f64,
	duration_ms: f64,
	base_fill: String,
	active_fill: String,
	on_change: Option<Box<dyn Fn()>>,
}

impl<D: Document> InteractionController<D> {
	/// Controller for the graph drawn under `root`.
	pub fn new(
		doc: D,
		root: D::Element,
		model: Rc<GraphModel>,
		tooltip: Rc<RefCell<TooltipPresenter<D>>>,
		config: &GraphConfig,
		theme: &Theme,
	) -> Self {
		Self {
			doc,
			root,
			model,
			tooltip,
			nodes: HashMap::new(),
			radius: config.node_radius,
			radius_active: config.node_radius_active,
			duration_ms: config.transition_duration_ms,
			base_fill: theme.node_base.fill_url(),
			active_fill: theme.node_active.fill_url(),
			on_change: None,
		}
	}

	/// Called after every hover state change, e.g. to wake an idle frame loop.
	pub fn set_on_change(&mut self, f: impl Fn() + 'static) {
		self.on_change = Some(Box::new(f));
	}

	/// Tracks the group and circle drawn for node `id`, starting inactive.
	pub fn register(&mut self, id: &str, group: D::Element, circle: D::Element) {
		self.nodes.insert(
			id.to_string(),
			RenderedNode {
				group,
				circle,
				state: NodeState::Inactive,
				radius: RadiusTransition::settled(self.radius, self.duration_ms),
				drawn: self.radius,
			},
		);
	}

	/// Routes pointer-over and pointer-out on `group` to `controller`.
	pub fn bind_hover(
		controller: &Rc<RefCell<Self>>,
		doc: &D,
		id: &str,
		group: &D::Element,
	) -> Result<()> {
		let (ctrl, node_id) = (controller.clone(), id.to_string());
		doc.listen(
			group,
			PointerKind::Over,
			Box::new(move |ev| {
				if let Err(e) = ctrl.borrow_mut().activate(&node_id, ev) {
					warn!("minion-graph: activating {node_id} failed: {e}");
				}
			}),
		)?;

		let (ctrl, node_id) = (controller.clone(), id.to_string());
		doc.listen(
			group,
			PointerKind::Out,
			Box::new(move |_| {
				if let Err(e) = ctrl.borrow_mut().deactivate(&node_id) {
					warn!("minion-graph: deactivating {node_id} failed: {e}");
				}
			}),
		)
	}

	pub fn state(&self, id: &str) -> NodeState {
		self.nodes.get(id).map(|n| n.state).unwrap_or_default()
	}

	/// Ids of all currently active nodes, sorted.
	pub fn active_nodes(&self) -> Vec<&str> {
		let mut ids: Vec<&str> = self
			.nodes
			.iter()
			.filter(|(_, n)| n.state == NodeState::Active)
			.map(|(id, _)| id.as_str())
			.collect();
		ids.sort_unstable();
		ids
	}

	/// Radius currently drawn for node `id`.
	pub fn radius(&self, id: &str) -> Option<f64> {
		self.nodes.get(id).map(|n| n.drawn)
	}

	/// Pointer entered node `id`. Repeating it while active changes nothing
	/// but the tooltip position.
	pub fn activate(&mut self, id: &str, pointer: PointerEvent) -> Result<()> {
		self.set_state(id, NodeState::Active)?;
		let node = self.model.lookup(id)?;
		self.tooltip
			.borrow_mut()
			.show(node, pointer.page_x, pointer.page_y)
	}

	/// Pointer left node `id`. Safe without a matching activation.
	pub fn deactivate(&mut self, id: &str) -> Result<()> {
		self.set_state(id, NodeState::Inactive)?;
		self.tooltip.borrow_mut().hide()
	}

	fn set_state(&mut self, id: &str, state: NodeState) -> Result<()> {
		let active = state == NodeState::Active;
		let (fill, radius) = if active {
			(&self.active_fill, self.radius_active)
		} else {
			(&self.base_fill, self.radius)
		};

		let node = self
			.nodes
			.get_mut(id)
			.ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
		self.doc.set_class(&node.group, ACTIVE_CLASS, active)?;
		self.doc.set_attribute(&node.circle, "fill", fill)?;
		node.radius.retarget(radius);
		node.state = state;

		for edge in self
			.doc
			.find_all(&self.root, EDGE_PATH_CLASS, Some((SOURCE_NODE_ATTR, id)))?
		{
			self.doc.set_class(&edge, ACTIVE_CLASS, active)?;
		}
		if let Some(on_change) = &self.on_change {
			on_change();
		}
		Ok(())
	}

	/// Advances radius transitions by `dt_ms` and redraws changed circles.
	///
	/// Returns whether any transition is still running.
	pub fn tick(&mut self, dt_ms: f64) -> Result<bool> {
		let mut running = false;
		for node in self.nodes.values_mut() {
			if node.radius.is_running() {
				node.radius.advance(dt_ms);
			}
			let r = node.radius.current();
			if r != node.drawn {
				self.doc.set_attribute(&node.circle, "r", &r.to_string())?;
				node.drawn = r;
			}
			running |= node.radius.is_running();
		}
		Ok(running)
	}
}
