#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, Surface};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{ElementId, ElementRecord, Registry};

/// One of the eight resize handles around the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Top,
        Handle::Bottom,
        Handle::Left,
        Handle::Right,
    ];

    /// Identifier understood by [`crate::geometry::Edges::from_handle`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.as_str() == name)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
            Self::Top | Self::Bottom => "ns-resize",
            Self::Left | Self::Right => "ew-resize",
        }
    }

    /// Handle center for an element, in canvas-local units.
    #[must_use]
    pub fn position(self, record: &ElementRecord) -> Point {
        let Point { x, y } = record.position;
        let (w, h) = (record.size.width, record.size.height);
        let (cx, cy) = match self {
            Self::TopLeft => (x, y),
            Self::TopRight => (x + w, y),
            Self::BottomLeft => (x, y + h),
            Self::BottomRight => (x + w, y + h),
            Self::Top => (x + w * 0.5, y),
            Self::Bottom => (x + w * 0.5, y + h),
            Self::Left => (x, y + h * 0.5),
            Self::Right => (x + w, y + h * 0.5),
        };
        Point::new(cx, cy)
    }
}

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Find what lies under `canvas_pt`.
///
/// Handles of the selected element are tested first, with a radius that is
/// constant in screen pixels. Then element bodies, top-most first.
#[must_use]
pub fn hit_test(canvas_pt: Point, registry: &Registry, surface: &Surface, selected_id: Option<&str>) -> Option<Hit> {
    let radius = surface.viewport_dist_to_canvas(HANDLE_RADIUS_PX);

    if let Some(selected) = selected_id.and_then(|id| registry.get(id)) {
        let handle = Handle::ALL.into_iter().find(|h| {
            let c = h.position(selected);
            (canvas_pt.x - c.x).abs() <= radius && (canvas_pt.y - c.y).abs() <= radius
        });
        if let Some(handle) = handle {
            return Some(Hit { element_id: selected.id.clone(), part: HitPart::Handle(handle) });
        }
    }

    registry
        .list()
        .into_iter()
        .rev()
        .find(|record| record.rect().contains(canvas_pt))
        .map(|record| Hit { element_id: record.id.clone(), part: HitPart::Body })
}
