use web_sys::Element;
use wire::{LayoutPatch, UpdateElementRequest, px};

use crate::camera::{Point, Surface};
use crate::doc::{ElementId, ElementRecord, Registry, RegistrySnapshot};
use crate::geometry::{Size, compute_drag, compute_resize};
use crate::hit::{Hit, HitPart, hit_test};
use crate::input::{Button, InputState, UiState};
use crate::render::Scene;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_MOVE: &str = "move";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Registry or UI state changed; repaint from [`EngineCore::scene`].
    RenderNeeded,
    SelectionChanged(Option<ElementId>),
    SetCursor(String),
    /// Send this request through a [`crate::commit::PatchTransport`].
    Commit(UpdateElementRequest),
    /// Write this snapshot through a [`crate::persist::SnapshotStore`].
    Persist(RegistrySnapshot),
}

/// Rounded geometry for the position panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub z: i64,
    pub width: f64,
    pub height: f64,
}

/// Core engine state: all logic that doesn't depend on the browser.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Every handler takes `&mut self`; there is no ambient state.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub registry: Registry,
    pub surface: Surface,
    pub ui: UiState,
    pub input: InputState,
}

impl EngineCore {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry, ..Self::default() }
    }

    // --- Data inputs ---

    /// Replace the registry, e.g. after loading a snapshot. Clears the selection.
    pub fn load_registry(&mut self, registry: Registry) {
        self.registry = registry;
        self.ui.selected_id = None;
        self.input = InputState::Idle;
    }

    /// Update the surface transform. A zoom that is not a positive finite
    /// number keeps the current zoom.
    pub fn set_surface(&mut self, surface: Surface) {
        let zoom = if surface.zoom.is_finite() && surface.zoom > 0.0 { surface.zoom } else { self.surface.zoom };
        self.surface = Surface { zoom, ..surface };
    }

    /// Toggle edit mode. Leaving or entering edit mode clears the selection.
    pub fn set_edit_mode(&mut self, edit_mode: bool) -> Vec<Action> {
        self.ui.edit_mode = edit_mode;
        let mut actions = self.set_selection(None);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Select from the layers panel without starting a gesture.
    pub fn select(&mut self, id: Option<&str>) -> Vec<Action> {
        if self.input.is_active() {
            return Vec::new();
        }
        let id = id.filter(|id| self.registry.get(id).is_some()).map(str::to_owned);
        let mut actions = self.set_selection(id);
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, viewport_pt: Point, button: Button) -> Vec<Action> {
        if !self.ui.edit_mode || button != Button::Primary || self.input.is_active() {
            return Vec::new();
        }
        let pt = self.surface.viewport_to_canvas(viewport_pt);
        let hit = hit_test(pt, &self.registry, &self.surface, self.ui.selected_id.as_deref());

        let Some(Hit { element_id, part }) = hit else {
            let mut actions = self.set_selection(None);
            if !actions.is_empty() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        };
        let Some(record) = self.registry.get(&element_id) else {
            return Vec::new();
        };
        let (origin_position, origin_size) = (record.position, record.size);

        let cursor = match part {
            HitPart::Handle(handle) => {
                self.input = InputState::Resizing {
                    id: element_id.clone(),
                    handle,
                    origin_pointer: pt,
                    origin_position,
                    origin_size,
                };
                handle.cursor()
            }
            HitPart::Body => {
                self.input = InputState::Dragging {
                    id: element_id.clone(),
                    origin_pointer: pt,
                    origin_position,
                    origin_size,
                };
                CURSOR_MOVE
            }
        };

        let mut actions = self.set_selection(Some(element_id));
        actions.push(Action::SetCursor(cursor.to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, viewport_pt: Point) -> Vec<Action> {
        let pt = self.surface.viewport_to_canvas(viewport_pt);
        let (id, position, size) = match &self.input {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { id, origin_pointer, origin_position, origin_size } => {
                let delta = Point::new(pt.x - origin_pointer.x, pt.y - origin_pointer.y);
                (id, compute_drag(*origin_position, delta), *origin_size)
            }
            InputState::Resizing { id, handle, origin_pointer, origin_position, origin_size } => {
                let delta = Point::new(pt.x - origin_pointer.x, pt.y - origin_pointer.y);
                let (position, size) = compute_resize(handle.as_str(), *origin_position, *origin_size, delta);
                (id, position, size)
            }
        };
        if self.registry.set_geometry(id, position, size) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// End the gesture wherever the pointer is. Always returns to idle.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let (id, origin_position, origin_size) = match std::mem::take(&mut self.input) {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { id, origin_position, origin_size, .. }
            | InputState::Resizing { id, origin_position, origin_size, .. } => (id, origin_position, origin_size),
        };

        let mut actions = Vec::new();
        if let Some(record) = self.registry.get(&id) {
            let patch = changed_fields(origin_position, origin_size, record);
            actions.push(Action::Commit(UpdateElementRequest::new(id, patch)));
            actions.push(Action::Persist(self.registry.snapshot()));
        }
        actions.push(Action::SetCursor(CURSOR_DEFAULT.to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// Rounded geometry of an element for display.
    #[must_use]
    pub fn inspect(&self, id: &str) -> Option<Inspection> {
        self.registry.get(id).map(|record| Inspection {
            id: record.id.clone(),
            x: record.position.x.round(),
            y: record.position.y.round(),
            z: record.z_index,
            width: record.size.width.round(),
            height: record.size.height.round(),
        })
    }

    /// Current frame to paint.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::build(&self.registry, &self.ui, &self.surface)
    }

    fn set_selection(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id.clone_from(&id);
        vec![Action::SelectionChanged(id)]
    }
}

/// Patch holding the fields whose formatted length differs from the origin.
fn changed_fields(origin_position: Point, origin_size: Size, record: &ElementRecord) -> LayoutPatch {
    let changed = |before: f64, after: f64| {
        let after = px(after);
        (px(before) != after).then_some(after)
    };
    LayoutPatch {
        width: changed(origin_size.width, record.size.width),
        height: changed(origin_size.height, record.size.height),
        top: changed(origin_position.y, record.position.y),
        left: changed(origin_position.x, record.position.x),
    }
}

/// The full engine. Wraps `EngineCore` and reads the surface transform from
/// the browser element that hosts the editable page.
pub struct Engine {
    surface_el: Element,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to the given surface element.
    #[must_use]
    pub fn new(surface_el: Element, registry: Registry) -> Self {
        Self { surface_el, core: EngineCore::new(registry) }
    }

    /// Re-read the surface's bounding rect and scroll offsets. Zoom is kept.
    pub fn refresh_surface(&mut self) {
        let rect = self.surface_el.get_bounding_client_rect();
        self.core.set_surface(Surface {
            origin_x: rect.left(),
            origin_y: rect.top(),
            scroll_x: f64::from(self.surface_el.scroll_left()),
            scroll_y: f64::from(self.surface_el.scroll_top()),
            zoom: self.core.surface.zoom,
        });
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.core.surface.zoom = zoom;
        }
    }

    // --- Delegated input events ---

    /// Pointer-down in client coordinates with a DOM button code.
    pub fn on_pointer_down(&mut self, client_x: f64, client_y: f64, button: i16) -> Vec<Action> {
        self.refresh_surface();
        self.core.on_pointer_down(Point::new(client_x, client_y), Button::from_dom(button))
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Vec<Action> {
        self.refresh_surface();
        self.core.on_pointer_move(Point::new(client_x, client_y))
    }

    /// Window-level pointer-up; the pointer may be anywhere.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn select(&mut self, id: Option<&str>) -> Vec<Action> {
        self.core.select(id)
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) -> Vec<Action> {
        self.core.set_edit_mode(edit_mode)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.core.selection()
    }

    #[must_use]
    pub fn inspect(&self, id: &str) -> Option<Inspection> {
        self.core.inspect(id)
    }

    /// Current frame, with the overlay projected through a fresh surface transform.
    pub fn scene(&mut self) -> Scene {
        self.refresh_surface();
        self.core.scene()
    }
}
