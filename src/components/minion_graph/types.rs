//! Graph data structures for input to the minion graph component.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Roles attached to a node.
///
/// Upstream data carries raw role codes. Before rendering, a [`RoleMap`]
/// rewrites them into a single display string; the rewrite is one-way.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Roles {
	/// Raw role codes as produced upstream, in their original order.
	Codes(Vec<String>),
	/// Joined, human-readable role labels.
	Display(String),
}

impl Default for Roles {
	fn default() -> Self {
		Roles::Codes(Vec::new())
	}
}

impl Roles {
	/// Whether the raw codes contain `role`. Display strings never match.
	pub fn contains(&self, role: &str) -> bool {
		match self {
			Roles::Codes(codes) => codes.iter().any(|c| c == role),
			Roles::Display(_) => false,
		}
	}
}

impl fmt::Display for Roles {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Roles::Codes(codes) => f.write_str(&codes.join(", ")),
			Roles::Display(text) => f.write_str(text),
		}
	}
}

/// A cluster machine in the graph.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in edges.
	pub id: String,
	/// Role codes, or their display string once prettified.
	#[serde(default)]
	pub roles: Roles,
	/// CPU model name as reported by the machine.
	#[serde(default)]
	pub cpu_model: String,
	/// Number of CPU cores.
	#[serde(default)]
	pub num_cpus: u32,
	/// Installed memory in megabytes.
	#[serde(default)]
	pub memory: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub os: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cpu_arch: Option<String>,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphEdge {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

impl GraphEdge {
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// Complete graph data: nodes and edges.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphEdge>,
}

/// Mapping from role code to display label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RoleMap(HashMap<String, String>);

impl RoleMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Display label for a single code; unmapped codes pass through.
	pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
		self.0.get(code).map(String::as_str).unwrap_or(code)
	}

	/// Maps each code to its label and joins them in their original order.
	pub fn prettify(&self, codes: &[String]) -> String {
		codes
			.iter()
			.map(|code| self.label(code))
			.collect::<Vec<_>>()
			.join(", ")
	}

	/// Rewrites the roles of every node into their display string.
	///
	/// Nodes whose roles are already a display string are left alone.
	pub fn apply(&self, nodes: &mut [GraphNode]) {
		for node in nodes {
			if let Roles::Codes(codes) = &node.roles {
				node.roles = Roles::Display(self.prettify(codes));
			}
		}
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RoleMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}
