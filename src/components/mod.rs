//! UI components.

pub mod minion_graph;
