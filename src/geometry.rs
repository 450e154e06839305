//! Canvas geometry: points, bounds, and scale-to-fit sizing.

use serde::{Deserialize, Serialize};

/// A 2D coordinate in canvas pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extent of an annotation's geometry (stroke width not included).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Builds the smallest bounds covering every point. Returns `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for point in &points[1..] {
            bounds.include(*point);
        }
        Some(bounds)
    }

    /// Grows the bounds to cover `point`.
    pub fn include(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Pixel dimensions of the drawing canvas plus the scale applied to the source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
    /// Source-to-canvas scale factor, never above 1.0
    pub scale: f64,
}

impl CanvasSize {
    pub const ZERO: CanvasSize = CanvasSize {
        width: 0,
        height: 0,
        scale: 0.0,
    };

    /// True when either dimension is zero and nothing can be drawn.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Computes the scale-to-fit canvas size for an image inside a container.
///
/// `scale = min(container_w / natural_w, container_h / natural_h, 1)`, so the image
/// keeps its aspect ratio and is never upscaled. Degenerate input (zero, negative,
/// or non-finite dimensions) yields [`CanvasSize::ZERO`] instead of panicking.
pub fn compute_canvas_size(
    natural_width: u32,
    natural_height: u32,
    container_width: f64,
    container_height: f64,
) -> CanvasSize {
    if natural_width == 0 || natural_height == 0 {
        return CanvasSize::ZERO;
    }
    if !container_width.is_finite() || !container_height.is_finite() {
        return CanvasSize::ZERO;
    }

    let container_width = container_width.max(0.0);
    let container_height = container_height.max(0.0);

    let scale = (container_width / natural_width as f64)
        .min(container_height / natural_height as f64)
        .min(1.0);

    CanvasSize {
        width: (natural_width as f64 * scale).round() as u32,
        height: (natural_height as f64 * scale).round() as u32,
        scale,
    }
}
