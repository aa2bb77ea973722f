#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either viewport or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement of the editable surface inside the browser viewport.
///
/// `origin_x` / `origin_y` are the surface's bounding-rect left/top in CSS
/// pixels. `scroll_x` / `scroll_y` are its scroll offsets. `zoom` is a scale
/// factor (1.0 = no zoom). Canvas-local coordinates are relative to the
/// surface's content origin and do not change when the viewport scrolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub origin_x: f64,
    pub origin_y: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub zoom: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, scroll_x: 0.0, scroll_y: 0.0, zoom: 1.0 }
    }
}

impl Surface {
    /// Convert a viewport point (pointer client coordinates) to canvas-local units.
    #[must_use]
    pub fn viewport_to_canvas(&self, viewport: Point) -> Point {
        Point {
            x: (viewport.x - self.origin_x + self.scroll_x) / self.zoom,
            y: (viewport.y - self.origin_y + self.scroll_y) / self.zoom,
        }
    }

    /// Convert a canvas-local point back to viewport coordinates.
    #[must_use]
    pub fn canvas_to_viewport(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom - self.scroll_x + self.origin_x,
            y: canvas.y * self.zoom - self.scroll_y + self.origin_y,
        }
    }

    /// Convert a viewport distance (pixels) to a canvas-local distance.
    #[must_use]
    pub fn viewport_dist_to_canvas(&self, viewport_dist: f64) -> f64 {
        viewport_dist / self.zoom
    }
}
