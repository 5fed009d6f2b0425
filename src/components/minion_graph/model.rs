//! Directed graph of minions keyed by node id.
//!
//! Built once per render and read-only afterwards. Edge identities are the
//! indices petgraph assigns at insertion time; the renderer stamps them onto
//! edge elements so the source node can be recovered later.

use std::collections::HashMap;
use std::fmt;

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef as _;

use super::error::{GraphError, Result};
use super::types::{GraphEdge, GraphNode};

/// Opaque identity of an edge within one model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "e{}", self.0)
	}
}

/// An edge as seen through the model, with both endpoints resolved to ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelEdge<'a> {
	pub id: EdgeId,
	pub source: &'a str,
	pub target: &'a str,
}

/// Nodes and directed edges of one graph, indexed by node id.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	graph: DiGraph<GraphNode, ()>,
	index: HashMap<String, NodeIndex>,
}

impl GraphModel {
	/// Registers `nodes` by id (last write wins) and then every edge.
	///
	/// Fails on the first edge naming an id that is not among `nodes`.
	pub fn build(nodes: &[GraphNode], edges: &[GraphEdge]) -> Result<Self> {
		let mut model = Self::default();
		for node in nodes {
			match model.index.get(&node.id) {
				Some(&idx) => model.graph[idx] = node.clone(),
				None => {
					let idx = model.graph.add_node(node.clone());
					model.index.insert(node.id.clone(), idx);
				}
			}
		}
		for edge in edges {
			let src = model.resolve(edge, &edge.source)?;
			let tgt = model.resolve(edge, &edge.target)?;
			model.graph.add_edge(src, tgt, ());
		}
		Ok(model)
	}

	fn resolve(&self, edge: &GraphEdge, id: &str) -> Result<NodeIndex> {
		self.index
			.get(id)
			.copied()
			.ok_or_else(|| GraphError::UnknownNodeReference {
				from: edge.source.clone(),
				to: edge.target.clone(),
				missing: id.to_string(),
			})
	}

	/// Metadata of the node registered under `id`.
	pub fn lookup(&self, id: &str) -> Result<&GraphNode> {
		self.index
			.get(id)
			.map(|&idx| &self.graph[idx])
			.ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
	}

	/// Outgoing edges of `id`, in insertion order.
	pub fn edges_from(&self, id: &str) -> Result<Vec<ModelEdge<'_>>> {
		let idx = self
			.index
			.get(id)
			.copied()
			.ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
		let mut edges: Vec<_> = self
			.graph
			.edges_directed(idx, Direction::Outgoing)
			.map(|e| self.model_edge(e.id(), e.source(), e.target()))
			.collect();
		edges.sort_by_key(|e| e.id);
		Ok(edges)
	}

	/// Every node id, in registration order.
	pub fn node_ids(&self) -> Vec<&str> {
		self.graph
			.node_indices()
			.map(|idx| self.graph[idx].id.as_str())
			.collect()
	}

	pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
		self.graph.node_weights()
	}

	/// Every edge, in insertion order.
	pub fn edges(&self) -> impl Iterator<Item = ModelEdge<'_>> {
		self.graph
			.raw_edges()
			.iter()
			.enumerate()
			.map(|(i, e)| self.model_edge(EdgeIndex::new(i), e.source(), e.target()))
	}

	pub fn edge(&self, id: EdgeId) -> Option<ModelEdge<'_>> {
		self.graph
			.raw_edges()
			.get(id.0)
			.map(|e| self.model_edge(EdgeIndex::new(id.0), e.source(), e.target()))
	}

	fn model_edge(&self, idx: EdgeIndex, src: NodeIndex, tgt: NodeIndex) -> ModelEdge<'_> {
		ModelEdge {
			id: EdgeId(idx.index()),
			source: &self.graph[src].id,
			target: &self.graph[tgt].id,
		}
	}

	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	/// Minion graphs are always directed.
	pub fn is_directed(&self) -> bool {
		true
	}
}
