//! Layered graph visualization of cluster minions.
//!
//! Renders minions and the role relationships between them as an SVG with:
//! - Rank-based layout computed by the `dagre` library
//! - Radial-gradient nodes labelled with their id and roles
//! - Hover highlighting of a node and its outgoing edges, with a metadata tooltip
//! - Pan, wheel zoom and an initial fit of the drawing into the container
//!
//! # Example
//!
//! ```ignore
//! use minion_graph::{GraphData, GraphEdge, GraphNode, MinionGraphView};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "n1".into(), roles: Roles::Codes(vec!["master".into()]), .. },
//!         GraphNode { id: "n2".into(), roles: Roles::Codes(vec!["worker".into()]), .. },
//!     ],
//!     edges: vec![GraphEdge::new("n1", "n2")],
//! };
//!
//! view! { <MinionGraphView data=data.into() fullscreen=true /> }
//! ```
//!
//! Outside Leptos, [`GraphRenderer`] renders into any [`Document`].

mod component;
pub mod config;
pub mod dom;
mod error;
pub mod interaction;
pub mod layout;
pub mod minion;
pub mod model;
pub mod render;
pub mod theme;
pub mod tooltip;
mod types;
pub mod viewport;
pub mod web;

pub use component::MinionGraphView;
pub use config::{GraphConfig, RankDir};
pub use dom::{Document, Namespace, PointerEvent, PointerKind};
pub use error::{GraphError, Result};
pub use layout::{DagreLayout, Layout, LayoutEngine, LayoutOptions};
pub use minion::{EdgeMap, Minion};
pub use model::{EdgeId, GraphModel};
pub use render::{DrawHooks, GraphRenderer, RenderSession};
pub use theme::Theme;
pub use tooltip::TooltipPresenter;
pub use types::{GraphData, GraphEdge, GraphNode, RoleMap, Roles};
pub use viewport::{BoundingBox, ViewTransform, ViewportFitter, ZoomBehavior};
