//! Layered layout through an external engine.
//!
//! Rank assignment, ordering and edge routing are not done here. A
//! [`LayoutEngine`] receives the model and spacing options and returns node
//! centres and edge polylines. [`DagreLayout`] delegates to the `dagre`
//! JavaScript library, which the host page must load.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use super::config::{GraphConfig, RankDir};
use super::error::{GraphError, Result};
use super::model::{EdgeId, GraphModel};

/// Spacing and direction handed to the layout engine.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
	pub rank_dir: RankDir,
	pub node_sep: f64,
	pub edge_sep: f64,
	pub rank_sep: f64,
	pub node_width: f64,
	pub node_height: f64,
}

impl From<&GraphConfig> for LayoutOptions {
	fn from(config: &GraphConfig) -> Self {
		let (node_width, node_height) = config.node_box();
		Self {
			rank_dir: config.rank_dir,
			node_sep: config.node_sep,
			edge_sep: config.edge_sep,
			rank_sep: config.rank_sep,
			node_width,
			node_height,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// Centre of a laid-out node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NodePlacement {
	pub x: f64,
	pub y: f64,
}

/// Positions computed for one model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	pub nodes: HashMap<String, NodePlacement>,
	pub edges: HashMap<EdgeId, Vec<Point>>,
}

impl Layout {
	pub fn node(&self, id: &str) -> Result<NodePlacement> {
		self.nodes
			.get(id)
			.copied()
			.ok_or_else(|| GraphError::Layout(format!("no position for node {id}")))
	}

	/// Polyline of an edge; empty when the engine routed nothing.
	pub fn edge_points(&self, id: EdgeId) -> &[Point] {
		self.edges.get(&id).map(Vec::as_slice).unwrap_or(&[])
	}
}

/// Computes node and edge geometry for a directed graph.
pub trait LayoutEngine {
	fn layout(&self, model: &GraphModel, options: &LayoutOptions) -> Result<Layout>;
}

/// SVG path data through `points`.
pub fn path_data(points: &[Point]) -> String {
	points
		.iter()
		.enumerate()
		.map(|(i, p)| format!("{}{},{}", if i == 0 { "M" } else { "L" }, p.x, p.y))
		.collect::<Vec<_>>()
		.join(" ")
}

mod dagre {
	use wasm_bindgen::prelude::*;

	#[wasm_bindgen]
	extern "C" {
		#[wasm_bindgen(js_namespace = ["dagre", "graphlib"])]
		pub type Graph;

		#[wasm_bindgen(catch, constructor, js_namespace = ["dagre", "graphlib"])]
		pub fn new(options: &JsValue) -> Result<Graph, JsValue>;

		#[wasm_bindgen(method, js_name = setGraph)]
		pub fn set_graph(this: &Graph, label: &JsValue);

		#[wasm_bindgen(method, js_name = setNode)]
		pub fn set_node(this: &Graph, id: &str, label: &JsValue);

		#[wasm_bindgen(method, js_name = setEdge)]
		pub fn set_edge(this: &Graph, v: &str, w: &str, label: &JsValue, name: &str);

		#[wasm_bindgen(method)]
		pub fn node(this: &Graph, id: &str) -> JsValue;

		#[wasm_bindgen(method)]
		pub fn edge(this: &Graph, v: &str, w: &str, name: &str) -> JsValue;

		#[wasm_bindgen(catch, js_namespace = dagre, js_name = layout)]
		pub fn run(graph: &Graph) -> Result<(), JsValue>;
	}
}

/// A graph whose labels are objects the layout writes its results into.
///
/// Labels are handles: cloning one shares the underlying object, as with
/// JavaScript values. Every node and edge must get a label of its own.
trait LabelGraph {
	type Label;

	fn label<T: Serialize>(&self, value: &T) -> Result<Self::Label>;
	fn set_graph(&self, label: &Self::Label);
	fn set_node(&self, id: &str, label: &Self::Label);
	fn set_edge(&self, v: &str, w: &str, name: &str, label: &Self::Label);
	fn run(&self) -> Result<()>;
	fn node<T: DeserializeOwned>(&self, id: &str) -> Result<T>;
	fn edge<T: DeserializeOwned>(&self, v: &str, w: &str, name: &str) -> Result<T>;
}

#[derive(Serialize)]
struct GraphLabel<'a> {
	rankdir: &'a str,
	nodesep: f64,
	edgesep: f64,
	ranksep: f64,
}

#[derive(Serialize)]
struct NodeLabel {
	width: f64,
	height: f64,
}

#[derive(Serialize)]
struct EdgeLabel {}

#[derive(Deserialize)]
struct EdgeRoute {
	#[serde(default)]
	points: Vec<Point>,
}

/// Feeds `model` into `graph`, runs the layout and reads the results back.
fn run_layout<G: LabelGraph>(graph: &G, model: &GraphModel, options: &LayoutOptions) -> Result<Layout> {
	graph.set_graph(&graph.label(&GraphLabel {
		rankdir: options.rank_dir.as_str(),
		nodesep: options.node_sep,
		edgesep: options.edge_sep,
		ranksep: options.rank_sep,
	})?);
	for id in model.node_ids() {
		let label = graph.label(&NodeLabel {
			width: options.node_width,
			height: options.node_height,
		})?;
		graph.set_node(id, &label);
	}
	for edge in model.edges() {
		let label = graph.label(&EdgeLabel {})?;
		graph.set_edge(edge.source, edge.target, &edge.id.to_string(), &label);
	}

	graph.run()?;

	let mut layout = Layout::default();
	for id in model.node_ids() {
		layout.nodes.insert(id.to_string(), graph.node(id)?);
	}
	for edge in model.edges() {
		let route: EdgeRoute = graph.edge(edge.source, edge.target, &edge.id.to_string())?;
		layout.edges.insert(edge.id, route.points);
	}
	Ok(layout)
}

fn js_error(context: &str, err: JsValue) -> GraphError {
	GraphError::Layout(format!("{context}: {err:?}"))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
	let json = serde_json::to_string(value)?;
	js_sys::JSON::parse(&json).map_err(|e| js_error("encoding label", e))
}

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T> {
	let json: String = js_sys::JSON::stringify(value)
		.map_err(|e| js_error("decoding label", e))?
		.into();
	Ok(serde_json::from_str(&json)?)
}

impl LabelGraph for dagre::Graph {
	type Label = JsValue;

	fn label<T: Serialize>(&self, value: &T) -> Result<JsValue> {
		to_js(value)
	}

	fn set_graph(&self, label: &JsValue) {
		dagre::Graph::set_graph(self, label);
	}

	fn set_node(&self, id: &str, label: &JsValue) {
		dagre::Graph::set_node(self, id, label);
	}

	fn set_edge(&self, v: &str, w: &str, name: &str, label: &JsValue) {
		dagre::Graph::set_edge(self, v, w, label, name);
	}

	fn run(&self) -> Result<()> {
		dagre::run(self).map_err(|e| js_error("dagre layout", e))
	}

	fn node<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
		from_js(&dagre::Graph::node(self, id))
	}

	fn edge<T: DeserializeOwned>(&self, v: &str, w: &str, name: &str) -> Result<T> {
		from_js(&dagre::Graph::edge(self, v, w, name))
	}
}

/// Layout by the `dagre` library on the host page.
#[derive(Clone, Copy, Debug, Default)]
pub struct DagreLayout;

impl LayoutEngine for DagreLayout {
	fn layout(&self, model: &GraphModel, options: &LayoutOptions) -> Result<Layout> {
		let graph = dagre::Graph::new(&to_js(&serde_json::json!({ "multigraph": true }))?)
			.map_err(|e| js_error("dagre is not available", e))?;
		run_layout(&graph, model, options)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use serde_json::{Value, json};

	use super::*;
	use crate::components::minion_graph::types::{GraphEdge, GraphNode, Roles};

	type SharedLabel = Rc<RefCell<Value>>;

	/// Writes results into the label objects it was handed, as dagre does.
	#[derive(Default)]
	struct WriteBackGraph {
		nodes: RefCell<Vec<(String, SharedLabel)>>,
		edges: RefCell<Vec<(String, SharedLabel)>>,
	}

	fn read<T: DeserializeOwned>(labels: &[(String, SharedLabel)], key: &str) -> Result<T> {
		let value = labels
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, label)| label.borrow().clone())
			.ok_or_else(|| GraphError::Layout(format!("no label {key}")))?;
		Ok(serde_json::from_value(value)?)
	}

	impl LabelGraph for WriteBackGraph {
		type Label = SharedLabel;

		fn label<T: Serialize>(&self, value: &T) -> Result<SharedLabel> {
			Ok(Rc::new(RefCell::new(serde_json::to_value(value)?)))
		}

		fn set_graph(&self, _label: &SharedLabel) {}

		fn set_node(&self, id: &str, label: &SharedLabel) {
			self.nodes.borrow_mut().push((id.to_string(), label.clone()));
		}

		fn set_edge(&self, _v: &str, _w: &str, name: &str, label: &SharedLabel) {
			self.edges.borrow_mut().push((name.to_string(), label.clone()));
		}

		fn run(&self) -> Result<()> {
			for (rank, (_, label)) in self.nodes.borrow().iter().enumerate() {
				let mut label = label.borrow_mut();
				label["x"] = json!(100.0 * rank as f64);
				label["y"] = json!(25.0);
			}
			for (i, (_, label)) in self.edges.borrow().iter().enumerate() {
				label.borrow_mut()["points"] = json!([{ "x": i as f64, "y": 0.0 }]);
			}
			Ok(())
		}

		fn node<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
			read(&self.nodes.borrow(), id)
		}

		fn edge<T: DeserializeOwned>(&self, _v: &str, _w: &str, name: &str) -> Result<T> {
			read(&self.edges.borrow(), name)
		}
	}

	fn machine(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			roles: Roles::default(),
			cpu_model: String::new(),
			num_cpus: 1,
			memory: 512,
			os: None,
			cpu_arch: None,
		}
	}

	#[test]
	fn every_node_and_edge_reads_back_its_own_result() {
		let model = GraphModel::build(
			&[machine("a"), machine("b"), machine("c")],
			&[GraphEdge::new("a", "b"), GraphEdge::new("a", "c")],
		)
		.unwrap();
		let options = LayoutOptions::from(&GraphConfig::default());

		let layout = run_layout(&WriteBackGraph::default(), &model, &options).unwrap();

		let xs: Vec<f64> = ["a", "b", "c"]
			.iter()
			.map(|id| layout.node(id).unwrap().x)
			.collect();
		assert_eq!(xs, vec![0.0, 100.0, 200.0]);
		let edges: Vec<EdgeId> = model.edges().map(|e| e.id).collect();
		assert_eq!(layout.edge_points(edges[0]), &[Point { x: 0.0, y: 0.0 }]);
		assert_eq!(layout.edge_points(edges[1]), &[Point { x: 1.0, y: 0.0 }]);
	}

	#[test]
	fn path_data_moves_then_draws_lines() {
		let points = [
			Point { x: 0.0, y: 0.0 },
			Point { x: 10.5, y: 4.0 },
			Point { x: 20.0, y: 8.0 },
		];
		assert_eq!(path_data(&points), "M0,0 L10.5,4 L20,8");
		assert_eq!(path_data(&[]), "");
	}

	#[test]
	fn options_follow_the_config() {
		let options = LayoutOptions::from(&GraphConfig::default());
		assert_eq!(options.rank_dir.as_str(), "LR");
		assert_eq!((options.node_sep, options.edge_sep, options.rank_sep), (55.0, 15.0, 200.0));
		assert_eq!((options.node_width, options.node_height), (50.0, 50.0));
	}

	#[test]
	fn missing_node_position_is_a_layout_error() {
		let err = Layout::default().node("n1").unwrap_err();
		assert_eq!(err.to_string(), "layout failed: no position for node n1");
	}
}
