//! Constructor-time configuration for the minion graph.
//!
//! All values are plain numbers or strings with documented defaults. Any
//! subset may be overridden from the page payload; missing fields fall back
//! to [`GraphConfig::default`]. Nothing here is validated.

use serde::{Deserialize, Serialize};

/// Direction in which layout ranks advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum RankDir {
	#[serde(rename = "TB")]
	TopBottom,
	#[serde(rename = "BT")]
	BottomTop,
	#[default]
	#[serde(rename = "LR")]
	LeftRight,
	#[serde(rename = "RL")]
	RightLeft,
}

impl RankDir {
	/// The `rankdir` value understood by dagre.
	pub fn as_str(self) -> &'static str {
		match self {
			RankDir::TopBottom => "TB",
			RankDir::BottomTop => "BT",
			RankDir::LeftRight => "LR",
			RankDir::RightLeft => "RL",
		}
	}
}

/// Visual and layout parameters for one graph instance.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Node circle radius at rest.
	pub node_radius: f64,
	/// Node circle radius while hovered.
	pub node_radius_active: f64,
	/// Horizontal separation between nodes in the same rank.
	pub node_sep: f64,
	/// Separation between adjacent edges.
	pub edge_sep: f64,
	/// Separation between ranks.
	pub rank_sep: f64,
	pub rank_dir: RankDir,
	/// Lower bound of the zoom scale.
	pub scale_extent_min: f64,
	/// Upper bound of the zoom scale.
	pub scale_extent_max: f64,
	/// Radius transition duration in milliseconds.
	pub transition_duration_ms: f64,
	/// Horizontal offset of node labels from the node centre.
	pub label_dx: f64,
	/// Vertical offset of the first label line from the node centre.
	pub label_dy: f64,
	/// Spacing between the id line and the roles line.
	pub label_line_space: f64,
	/// Outer margin kept around the fitted content.
	pub margin: f64,
	/// Gap between the tooltip's right edge and the pointer.
	pub tooltip_offset_x: f64,
	/// Distance the tooltip's top edge sits above the pointer.
	pub tooltip_offset_y: f64,
	pub tooltip_opacity: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			node_radius: 20.0,
			node_radius_active: 25.0,
			node_sep: 55.0,
			edge_sep: 15.0,
			rank_sep: 200.0,
			rank_dir: RankDir::LeftRight,
			scale_extent_min: 0.0,
			scale_extent_max: 5.0,
			transition_duration_ms: 100.0,
			label_dx: 15.0,
			label_dy: 25.0,
			label_line_space: 20.0,
			margin: 20.0,
			tooltip_offset_x: 60.0,
			tooltip_offset_y: 30.0,
			tooltip_opacity: 1.0,
		}
	}
}

impl GraphConfig {
	/// Width and height reserved for each node when laying out.
	///
	/// Sized to the active radius so a hovered node never overlaps a neighbour.
	pub fn node_box(&self) -> (f64, f64) {
		let side = self.node_radius_active * 2.0;
		(side, side)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_remaining_defaults() {
		let config: GraphConfig =
			serde_json::from_str(r#"{"margin": 40, "rank_dir": "TB"}"#).unwrap();
		assert_eq!(config.margin, 40.0);
		assert_eq!(config.rank_dir, RankDir::TopBottom);
		assert_eq!(config.node_radius, 20.0);
		assert_eq!(config.scale_extent_max, 5.0);
	}

	#[test]
	fn node_box_fits_the_active_circle() {
		assert_eq!(GraphConfig::default().node_box(), (50.0, 50.0));
	}
}
