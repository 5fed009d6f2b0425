//! Conversion of raw minion inventory into graph data.
//!
//! Minions are reported with their hardware facts and role assignments. An
//! [`EdgeMap`] declares which roles talk to which; every pair of minions
//! whose roles satisfy an entry becomes a directed edge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{GraphData, GraphEdge, GraphNode, Roles};

/// Source role to the roles its minions connect to.
pub type EdgeMap = BTreeMap<String, Vec<String>>;

/// A managed machine as reported by the inventory.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Minion {
	pub id: String,
	#[serde(default)]
	pub os: Option<String>,
	#[serde(default)]
	pub cpu_model: String,
	#[serde(default)]
	pub cpu_arch: Option<String>,
	#[serde(default)]
	pub num_cpus: u32,
	#[serde(default)]
	pub memory: u64,
	#[serde(default)]
	pub roles: Vec<String>,
	/// Roles recorded for the running instance. Takes precedence over `roles`.
	#[serde(default)]
	pub instance_roles: Option<Vec<String>>,
}

impl Minion {
	/// Graph node carrying the subset of minion facts shown in the view.
	pub fn to_node(&self) -> GraphNode {
		let roles = self
			.instance_roles
			.clone()
			.unwrap_or_else(|| self.roles.clone());
		GraphNode {
			id: self.id.clone(),
			roles: Roles::Codes(roles),
			cpu_model: self.cpu_model.clone(),
			num_cpus: self.num_cpus,
			memory: self.memory,
			os: self.os.clone(),
			cpu_arch: self.cpu_arch.clone(),
		}
	}
}

/// Edges from every node holding a source role to every node holding one of
/// its target roles. A node holding both ends links to itself.
pub fn edges_from_role_map(nodes: &[GraphNode], edge_map: &EdgeMap) -> Vec<GraphEdge> {
	let mut edges = Vec::new();
	for (source_role, target_roles) in edge_map {
		for source in nodes.iter().filter(|n| n.roles.contains(source_role)) {
			for target in nodes {
				for target_role in target_roles {
					if target.roles.contains(target_role) {
						edges.push(GraphEdge::new(&source.id, &target.id));
					}
				}
			}
		}
	}
	edges
}

impl GraphData {
	/// Builds nodes from `minions` and derives their edges from `edge_map`.
	pub fn from_minions(minions: &[Minion], edge_map: &EdgeMap) -> Self {
		let nodes: Vec<GraphNode> = minions.iter().map(Minion::to_node).collect();
		let edges = edges_from_role_map(&nodes, edge_map);
		Self { nodes, edges }
	}
}
