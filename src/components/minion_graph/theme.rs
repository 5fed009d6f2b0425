//! Visual theming for the minion graph.
//!
//! Node fills are radial gradients referenced by id from the SVG `defs`; the
//! active gradient is swapped in while a node is hovered.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// One colour stop of a gradient. `offset` is a percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	pub offset: f64,
	pub color: Color,
}

/// A `radialGradient` definition, positioned in percent of the shape box.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
	pub id: &'static str,
	pub cx: f64,
	pub cy: f64,
	pub r: f64,
	pub stops: Vec<GradientStop>,
}

impl RadialGradient {
	/// Off-centre highlight fading from `inner` to `outer`.
	fn lit(id: &'static str, inner: Color, outer: Color) -> Self {
		Self {
			id,
			cx: 40.0,
			cy: 40.0,
			r: 50.0,
			stops: vec![
				GradientStop {
					offset: 0.0,
					color: inner,
				},
				GradientStop {
					offset: 100.0,
					color: outer,
				},
			],
		}
	}

	/// `fill` attribute value referencing this gradient.
	pub fn fill_url(&self) -> String {
		format!("url(#{})", self.id)
	}
}

/// Arrowhead marker drawn at the end of every edge path.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerStyle {
	pub id: &'static str,
	pub view_box: &'static str,
	pub ref_x: f64,
	pub ref_y: f64,
	pub width: f64,
	pub height: f64,
	pub path: &'static str,
	pub fill: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Fill of nodes at rest.
	pub node_base: RadialGradient,
	/// Fill of hovered nodes.
	pub node_active: RadialGradient,
	pub arrowhead: MarkerStyle,
}

impl Theme {
	/// Grey nodes that light up teal on hover (default)
	pub fn default_theme() -> Self {
		Self {
			node_base: RadialGradient::lit(
				"node-g1",
				Color::rgb(153, 153, 153),
				Color::rgb(51, 51, 51),
			),
			node_active: RadialGradient::lit(
				"node-g2",
				Color::rgb(114, 187, 198),
				Color::rgb(27, 79, 86),
			),
			arrowhead: MarkerStyle {
				id: "arrowhead",
				view_box: "0 0 10 10",
				ref_x: 8.0,
				ref_y: 5.0,
				width: 8.0,
				height: 5.0,
				path: "M 0 0 L 10 5 L 0 10 z",
				fill: Color::rgb(51, 51, 51),
			},
		}
	}

	pub fn gradients(&self) -> [&RadialGradient; 2] {
		[&self.node_base, &self.node_active]
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
