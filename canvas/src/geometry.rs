//! Geometry engine: pure drag and resize math in canvas-local units.
//!
//! Resize handles are named by the edges they move (`"top-left"`,
//! `"right"`, ...). The per-edge rules are combined first and the minimum
//! size is enforced afterwards, so dragging an edge past its opposite edge
//! stops at [`MIN_SIZE`] instead of inverting the box.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
pub use crate::consts::MIN_SIZE;

/// Width and height in canvas-local units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions raised to at least [`MIN_SIZE`].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { width: clamp_dimension(self.width), height: clamp_dimension(self.height) }
    }
}

/// Axis-aligned rectangle, position at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(position: Point, size: Size) -> Self {
        Self { x: position.x, y: position.y, width: size.width, height: size.height }
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }
}

/// Which edges a resize handle moves.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Edges {
    /// Edges named in a handle identifier. A handle moves every edge whose
    /// name it contains, so `"bottom-right"` moves both.
    #[must_use]
    pub fn from_handle(handle: &str) -> Self {
        Self {
            top: handle.contains("top"),
            right: handle.contains("right"),
            bottom: handle.contains("bottom"),
            left: handle.contains("left"),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.top || self.right || self.bottom || self.left)
    }
}

/// New position after moving by `delta`.
#[must_use]
pub fn compute_drag(origin: Point, delta: Point) -> Point {
    Point::new(origin.x + delta.x, origin.y + delta.y)
}

/// New position and size after dragging `handle` by `delta`.
///
/// When a left or top drag runs into the minimum size, the right or bottom
/// edge stays where it was.
#[must_use]
pub fn compute_resize(handle: &str, origin: Point, size: Size, delta: Point) -> (Point, Size) {
    let edges = Edges::from_handle(handle);
    let (mut x, mut y) = (origin.x, origin.y);
    let (mut w, mut h) = (size.width, size.height);

    if edges.right {
        w += delta.x;
    }
    if edges.bottom {
        h += delta.y;
    }
    if edges.left {
        w -= delta.x;
        x += delta.x;
    }
    if edges.top {
        h -= delta.y;
        y += delta.y;
    }

    let clamped = Size::new(w, h).clamped();
    if edges.left && w < MIN_SIZE {
        x = origin.x + size.width - clamped.width;
    }
    if edges.top && h < MIN_SIZE {
        y = origin.y + size.height - clamped.height;
    }
    (Point::new(x, y), clamped)
}

fn clamp_dimension(value: f64) -> f64 {
    if value.is_nan() { MIN_SIZE } else { value.max(MIN_SIZE) }
}
