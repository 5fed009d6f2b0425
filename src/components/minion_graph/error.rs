//! Error type shared by the graph model, layout and rendering layers.

use thiserror::Error;

/// Errors raised while building, laying out or rendering a minion graph.
#[derive(Debug, Error)]
pub enum GraphError {
	/// A lookup named a node id that is not part of the model.
	#[error("node {0} not found")]
	NodeNotFound(String),

	/// An edge names an endpoint that was never registered as a node.
	#[error("edge {from} -> {to} references unknown node {missing}")]
	UnknownNodeReference {
		from: String,
		to: String,
		missing: String,
	},

	/// The render target could not be located in the document.
	#[error("container {0} not found")]
	ContainerNotFound(String),

	/// A DOM call failed or returned an unexpected node type.
	#[error("dom operation failed: {0}")]
	Dom(String),

	/// The external layout engine failed or returned malformed geometry.
	#[error("layout failed: {0}")]
	Layout(String),

	/// The embedded graph payload could not be decoded.
	#[error("invalid graph payload: {0}")]
	Payload(#[from] serde_json::Error),
}

/// Result alias used throughout the graph component.
pub type Result<T> = std::result::Result<T, GraphError>;
