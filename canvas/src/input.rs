//! Input model: mouse buttons, persistent UI state, and the gesture state machine.
//!
//! `InputState` is the active gesture between pointer-down and pointer-up.
//! Each active variant carries the origin pointer and origin geometry, so
//! every pointer-move recomputes from the origin instead of accumulating
//! per-event deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ElementId;
use crate::geometry::Size;
use crate::hit::Handle;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Back/forward buttons count as secondary.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            _ => Self::Secondary,
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Pointer input manipulates elements only in edit mode.
    pub edit_mode: bool,
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
}

impl Default for UiState {
    fn default() -> Self {
        Self { edit_mode: true, selected_id: None }
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an element.
    Dragging {
        id: ElementId,
        /// Canvas-local pointer position at pointer-down.
        origin_pointer: Point,
        origin_position: Point,
        /// Size at pointer-down, used to detect which fields changed on commit.
        origin_size: Size,
    },
    /// The user is resizing an element by one of its eight handles.
    Resizing {
        id: ElementId,
        handle: Handle,
        origin_pointer: Point,
        origin_position: Point,
        origin_size: Size,
    },
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Id of the element being manipulated, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(id),
        }
    }
}
