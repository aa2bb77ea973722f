//! Scripted gestures: drive the editor engine headlessly and capture the
//! commit it would send.

use canvas::camera::Point;
use canvas::doc::Registry;
use canvas::engine::{Action, EngineCore};
use canvas::hit::Handle;
use canvas::input::Button;
use wire::UpdateElementRequest;

use crate::CliError;

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

/// Press on `id` (its body, or `handle` of it), move by `(dx, dy)` and release.
///
/// The surface is untransformed, so deltas are canvas-local units.
pub fn replay_gesture(
    registry: Registry,
    id: &str,
    handle: Option<Handle>,
    dx: f64,
    dy: f64,
) -> Result<UpdateElementRequest, CliError> {
    let mut core = EngineCore::new(registry);
    let record = core.registry.get(id).ok_or_else(|| CliError::UnknownElement(id.to_owned()))?;

    let start = match handle {
        Some(handle) => handle.position(record),
        None => {
            let rect = record.rect();
            Point::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
        }
    };
    if handle.is_some() {
        core.select(Some(id));
    }

    core.on_pointer_down(start, Button::Primary);
    core.on_pointer_move(Point::new(start.x + dx, start.y + dy));
    let request = core.on_pointer_up().into_iter().find_map(|action| match action {
        Action::Commit(request) => Some(request),
        _ => None,
    });

    match request {
        Some(request) if request.selected_id == id => Ok(request),
        Some(request) => Err(CliError::GestureMissed { id: id.to_owned(), hit: Some(request.selected_id) }),
        None => Err(CliError::GestureMissed { id: id.to_owned(), hit: None }),
    }
}
