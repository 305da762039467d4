//! Canvas-bound and minimum-size rules for button geometry

use crate::constants::geometry::MIN_BUTTON_DIMENSION;
use crate::types::{Button, CanvasSize, Geometry};

impl Geometry {
    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Entirely inside a canvas anchored at the origin
    pub fn fits_within(&self, canvas: CanvasSize) -> bool {
        self.left() >= 0.0
            && self.top() >= 0.0
            && self.right() <= canvas.width as f64
            && self.bottom() <= canvas.height as f64
    }

    /// The at-rest button invariant: contained and at least the minimum size
    pub fn satisfies_invariant(&self, canvas: CanvasSize) -> bool {
        self.fits_within(canvas)
            && self.width >= MIN_BUTTON_DIMENSION
            && self.height >= MIN_BUTTON_DIMENSION
    }
}

/// Repair one axis: grow to the minimum, pull the origin inside, then trim the extent.
///
/// When the canvas is shorter than MIN_BUTTON_DIMENSION the origin ends at 0 and
/// the extent collapses to the canvas, so containment wins over the minimum.
fn clamp_axis(origin: f64, extent: f64, canvas: f64) -> (f64, f64) {
    let origin = if origin.is_finite() { origin } else { 0.0 };
    let extent = if extent.is_nan() { MIN_BUTTON_DIMENSION } else { extent };

    let extent = extent.max(MIN_BUTTON_DIMENSION);
    // min/max rather than f64::clamp, which panics when canvas < extent
    let origin = origin.min(canvas - extent).max(0.0);
    let extent = extent.min(canvas - origin);
    (origin, extent)
}

/// Clamp raw geometry into a canvas
pub fn clamp_geometry(geometry: Geometry, canvas: CanvasSize) -> Geometry {
    let (x, width) = clamp_axis(geometry.x, geometry.width, canvas.width as f64);
    let (y, height) = clamp_axis(geometry.y, geometry.height, canvas.height as f64);
    Geometry::new(x, y, width, height)
}

/// Return `button` with its geometry repaired for the given canvas.
///
/// Total and side-effect free; out-of-range input is never an error.
pub fn clamp(button: &Button, canvas_width: u32, canvas_height: u32) -> Button {
    let canvas = CanvasSize::new(canvas_width, canvas_height);
    button
        .clone()
        .with_geometry(clamp_geometry(button.geometry(), canvas))
}
