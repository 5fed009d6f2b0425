//! Viewport fitting and pan/zoom transforms.
//!
//! # Coordinate Spaces
//!
//! - **Content space**: coordinates produced by the layout engine, in which
//!   nodes, edges and labels are drawn.
//! - **Viewport space**: pixels of the SVG element.
//!
//! A [`ViewTransform`] maps content space to viewport space as
//! `translate(tx, ty) scale(s)`: a content point `p` lands at `t + s * p`.
//!
//! The initial transform comes from [`ViewportFitter::fit`]. It seeds a
//! [`ZoomBehavior`], so wheel and drag gestures compose with the fit instead
//! of resetting it.

/// Axis-aligned box in content space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl BoundingBox {
	pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Box of the given size anchored at the origin.
	pub fn sized(width: f64, height: f64) -> Self {
		Self::new(0.0, 0.0, width, height)
	}

	fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}
}

/// Uniform scale plus translation applied to the content root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub scale: f64,
	pub translate_x: f64,
	pub translate_y: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::identity()
	}
}

impl ViewTransform {
	pub fn identity() -> Self {
		Self {
			scale: 1.0,
			translate_x: 0.0,
			translate_y: 0.0,
		}
	}

	/// SVG `transform` attribute value, translation first.
	pub fn to_svg(&self) -> String {
		format!(
			"translate({},{}) scale({})",
			self.translate_x, self.translate_y, self.scale
		)
	}

	/// Maps a content point into viewport space.
	pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
		(
			self.translate_x + x * self.scale,
			self.translate_y + y * self.scale,
		)
	}

	/// Maps a viewport point back into content space.
	pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
		(
			(x - self.translate_x) / self.scale,
			(y - self.translate_y) / self.scale,
		)
	}
}

/// Allowed zoom scale range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleExtent {
	pub min: f64,
	pub max: f64,
}

impl ScaleExtent {
	pub fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	pub fn clamp(&self, scale: f64) -> f64 {
		scale.max(self.min).min(self.max)
	}
}

/// Computes the transform that fits content inside a viewport with margins.
#[derive(Clone, Copy, Debug)]
pub struct ViewportFitter {
	pub margin: f64,
	pub extent: ScaleExtent,
}

impl ViewportFitter {
	pub fn new(margin: f64, extent: ScaleExtent) -> Self {
		Self { margin, extent }
	}

	/// Shrinks oversized content uniformly and centres whatever slack is left.
	///
	/// Content that already fits keeps its natural size. The translation is
	/// `margin` plus half the remaining slack on each axis; the box origin is
	/// not used. Empty content maps to `translate(margin, margin) scale(1)`.
	pub fn fit(&self, content: BoundingBox, width: f64, height: f64) -> ViewTransform {
		let margin = self.margin;
		if content.is_empty() {
			return ViewTransform {
				scale: self.extent.clamp(1.0),
				translate_x: margin,
				translate_y: margin,
			};
		}

		let inner_width = width - 2.0 * margin;
		let inner_height = height - 2.0 * margin;

		let mut scale = 1.0;
		if content.width > inner_width || content.height > inner_height {
			scale = (inner_width / content.width).min(inner_height / content.height);
		}
		let scale = self.extent.clamp(scale);

		let mut translate_x = margin;
		let mut translate_y = margin;

		let scaled_width = scale * content.width;
		if scaled_width < inner_width {
			translate_x += (inner_width - scaled_width) / 2.0;
		}
		let scaled_height = scale * content.height;
		if scaled_height < inner_height {
			translate_y += (inner_height - scaled_height) / 2.0;
		}

		ViewTransform {
			scale,
			translate_x,
			translate_y,
		}
	}
}

/// Tracks an in-progress drag pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pan and zoom gesture state for one rendered graph.
#[derive(Clone, Debug)]
pub struct ZoomBehavior {
	extent: ScaleExtent,
	transform: ViewTransform,
	pan: PanState,
}

/// Scale factor applied per wheel notch.
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

impl ZoomBehavior {
	pub fn new(extent: ScaleExtent) -> Self {
		Self {
			extent,
			transform: ViewTransform::identity(),
			pan: PanState::default(),
		}
	}

	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	pub fn is_panning(&self) -> bool {
		self.pan.active
	}

	/// Replaces the current transform, e.g. with the initial fit.
	pub fn seed(&mut self, transform: ViewTransform) {
		self.transform = ViewTransform {
			scale: self.extent.clamp(transform.scale),
			..transform
		};
	}

	/// Zooms one wheel step about the viewport point `(x, y)`, keeping it fixed.
	///
	/// A zero `delta_y` (horizontal-only scrolling) leaves the transform alone.
	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> ViewTransform {
		if delta_y == 0.0 {
			return self.transform;
		}
		let factor = if delta_y > 0.0 {
			WHEEL_ZOOM_OUT
		} else {
			WHEEL_ZOOM_IN
		};
		self.zoom_to(x, y, self.transform.scale * factor)
	}

	/// Sets the scale to `scale` (clamped) about the viewport point `(x, y)`.
	pub fn zoom_to(&mut self, x: f64, y: f64, scale: f64) -> ViewTransform {
		let t = &mut self.transform;
		let new_k = self.extent.clamp(scale);
		if t.scale > 0.0 {
			let ratio = new_k / t.scale;
			t.translate_x = x - (x - t.translate_x) * ratio;
			t.translate_y = y - (y - t.translate_y) * ratio;
		}
		t.scale = new_k;
		*t
	}

	pub fn pan_start(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.translate_x,
			transform_start_y: self.transform.translate_y,
		};
	}

	/// Moves the content with the pointer. Returns `None` when not panning.
	pub fn pan_move(&mut self, x: f64, y: f64) -> Option<ViewTransform> {
		if !self.pan.active {
			return None;
		}
		self.transform.translate_x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.transform.translate_y = self.pan.transform_start_y + (y - self.pan.start_y);
		Some(self.transform)
	}

	pub fn pan_end(&mut self) {
		self.pan.active = false;
	}
}
