//! Scene projection: what the host should paint, derived from the registry.
//!
//! This module never mutates application state. Element boxes are in
//! canvas-local units (the host positions them inside the editable surface);
//! the selection overlay and its handles are in viewport units so they can
//! be drawn on a fixed layer above a scrolled or zoomed surface.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wire::px;

use crate::camera::Surface;
use crate::consts::HANDLE_SIZE_PX;
use crate::doc::{ElementId, Registry};
use crate::geometry::Rect;
use crate::hit::Handle;
use crate::input::UiState;

/// One element to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBox {
    pub id: ElementId,
    pub kind: String,
    /// Canvas-local.
    pub rect: Rect,
    pub z_index: i64,
    pub selected: bool,
}

impl ElementBox {
    /// Inline CSS that places the element inside the surface.
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "position: absolute; left: {}; top: {}; width: {}; height: {}; z-index: {}",
            px(self.rect.x),
            px(self.rect.y),
            px(self.rect.width),
            px(self.rect.height),
            self.z_index
        )
    }
}

/// A resize handle square, in viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleBox {
    pub handle: Handle,
    pub rect: Rect,
}

/// Selection outline and handles, in viewport units.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOverlay {
    pub id: ElementId,
    pub rect: Rect,
    pub handles: Vec<HandleBox>,
}

/// Everything the host paints for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Bottom-most first.
    pub elements: Vec<ElementBox>,
    /// Present only in edit mode with a live selection.
    pub overlay: Option<SelectionOverlay>,
}

impl Scene {
    /// Project the registry for the current UI state and surface.
    #[must_use]
    pub fn build(registry: &Registry, ui: &UiState, surface: &Surface) -> Self {
        let selected = ui.selected_id.as_deref();
        let elements = registry
            .list()
            .into_iter()
            .map(|record| ElementBox {
                id: record.id.clone(),
                kind: record.kind.clone(),
                rect: record.rect(),
                z_index: record.z_index,
                selected: selected == Some(record.id.as_str()),
            })
            .collect();

        let overlay = selected
            .filter(|_| ui.edit_mode)
            .and_then(|id| registry.get(id))
            .map(|record| {
                let top_left = surface.canvas_to_viewport(record.position);
                let rect = Rect {
                    x: top_left.x,
                    y: top_left.y,
                    width: record.size.width * surface.zoom,
                    height: record.size.height * surface.zoom,
                };
                let half = HANDLE_SIZE_PX * 0.5;
                let handles = Handle::ALL
                    .into_iter()
                    .map(|handle| {
                        let c = surface.canvas_to_viewport(handle.position(record));
                        HandleBox {
                            handle,
                            rect: Rect { x: c.x - half, y: c.y - half, width: HANDLE_SIZE_PX, height: HANDLE_SIZE_PX },
                        }
                    })
                    .collect();
                SelectionOverlay { id: record.id.clone(), rect, handles }
            });

        Self { elements, overlay }
    }
}
