#![allow(clippy::float_cmp)]

use super::*;
use crate::hit::Handle;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn core_with(id: &str, x: f64, y: f64, w: f64, h: f64) -> EngineCore {
    let mut registry = Registry::new();
    registry.insert(ElementRecord::new(id, "button", pt(x, y), Size::new(w, h)));
    EngineCore::new(registry)
}

fn commits(actions: &[Action]) -> Vec<&UpdateElementRequest> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Commit(request) => Some(request),
            _ => None,
        })
        .collect()
}

fn geometry(core: &EngineCore, id: &str) -> (Point, Size) {
    let record = core.registry.get(id).unwrap();
    (record.position, record.size)
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_commits_new_position() {
    let mut core = core_with("b1", 100.0, 100.0, 80.0, 40.0);
    core.on_pointer_down(pt(110.0, 110.0), Button::Primary);
    core.on_pointer_move(pt(125.0, 105.0));
    let actions = core.on_pointer_up();

    assert_eq!(geometry(&core, "b1").0, pt(115.0, 95.0));
    let sent = commits(&actions);
    assert_eq!(sent.len(), 1);
    assert_eq!(
        serde_json::to_value(sent[0]).unwrap(),
        serde_json::json!({ "selectedId": "b1", "patch": { "top": "95px", "left": "115px" } })
    );
}

#[test]
fn drag_is_computed_from_origin_not_accumulated() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary);
    for step in 1..=20 {
        core.on_pointer_move(pt(10.0 + f64::from(step), 10.0));
    }
    core.on_pointer_move(pt(13.0, 10.0));
    assert_eq!(geometry(&core, "b1").0, pt(3.0, 0.0));
}

#[test]
fn moves_write_only_the_registry() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary);
    let actions = core.on_pointer_move(pt(30.0, 40.0));
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.scene().elements[0].rect.x, 20.0);
}

#[test]
fn drag_starts_on_unselected_element_and_selects_it() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    let actions = core.on_pointer_down(pt(25.0, 25.0), Button::Primary);
    assert_eq!(
        actions,
        vec![
            Action::SelectionChanged(Some("b1".into())),
            Action::SetCursor("move".into()),
            Action::RenderNeeded,
        ]
    );
    assert!(matches!(core.input, InputState::Dragging { .. }));
}

// =============================================================
// Resize
// =============================================================

#[test]
fn top_left_resize_moves_and_shrinks() {
    let mut core = core_with("b1", 0.0, 0.0, 100.0, 80.0);
    core.select(Some("b1"));
    let actions = core.on_pointer_down(pt(0.0, 0.0), Button::Primary);
    assert!(actions.contains(&Action::SetCursor("nwse-resize".into())));
    assert!(matches!(core.input, InputState::Resizing { handle: Handle::TopLeft, .. }));

    core.on_pointer_move(pt(10.0, 10.0));
    let actions = core.on_pointer_up();
    assert_eq!(geometry(&core, "b1"), (pt(10.0, 10.0), Size::new(90.0, 70.0)));

    let patch = &commits(&actions)[0].patch;
    assert_eq!(patch.width.as_deref(), Some("90px"));
    assert_eq!(patch.height.as_deref(), Some("70px"));
    assert_eq!(patch.top.as_deref(), Some("10px"));
    assert_eq!(patch.left.as_deref(), Some("10px"));
}

#[test]
fn handle_press_does_not_start_a_body_drag() {
    let mut core = core_with("b1", 0.0, 0.0, 100.0, 80.0);
    core.select(Some("b1"));
    // Right-edge handle sits inside the body's bounds.
    core.on_pointer_down(pt(99.0, 40.0), Button::Primary);
    core.on_pointer_move(pt(129.0, 60.0));
    assert_eq!(geometry(&core, "b1"), (pt(0.0, 0.0), Size::new(130.0, 80.0)));
}

#[test]
fn resize_commit_holds_only_changed_fields() {
    let mut core = core_with("b1", 0.0, 0.0, 100.0, 80.0);
    core.select(Some("b1"));
    core.on_pointer_down(pt(100.0, 80.0), Button::Primary);
    core.on_pointer_move(pt(120.0, 80.0));
    let actions = core.on_pointer_up();
    let patch = &commits(&actions)[0].patch;
    assert_eq!(patch.width.as_deref(), Some("120px"));
    assert_eq!(patch.height, None);
    assert_eq!(patch.top, None);
    assert_eq!(patch.left, None);
}

#[test]
fn resize_clamps_to_minimum_size() {
    let mut core = core_with("b1", 0.0, 0.0, 100.0, 80.0);
    core.select(Some("b1"));
    core.on_pointer_down(pt(100.0, 80.0), Button::Primary);
    core.on_pointer_move(pt(-400.0, -400.0));
    assert_eq!(geometry(&core, "b1").1, Size::new(32.0, 32.0));
}

// =============================================================
// Gesture lifecycle
// =============================================================

#[test]
fn pointer_up_always_returns_to_idle() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary);
    // Far outside the element and the surface.
    core.on_pointer_move(pt(-900.0, 4000.0));
    let actions = core.on_pointer_up();
    assert_eq!(core.input, InputState::Idle);
    assert_eq!(commits(&actions).len(), 1);
    assert!(actions.contains(&Action::SetCursor("default".into())));
}

#[test]
fn pointer_up_while_idle_does_nothing() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    assert!(core.on_pointer_up().is_empty());
}

#[test]
fn click_without_movement_commits_an_empty_patch() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary);
    let actions = core.on_pointer_up();
    assert!(commits(&actions)[0].patch.is_empty());
}

#[test]
fn sub_pixel_jitter_below_format_precision_is_not_a_change() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary);
    core.on_pointer_move(pt(10.0001, 10.0));
    let actions = core.on_pointer_up();
    assert!(commits(&actions)[0].patch.is_empty());
}

#[test]
fn second_pointer_down_during_gesture_is_ignored() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary);
    let before = core.input.clone();
    assert!(core.on_pointer_down(pt(500.0, 500.0), Button::Primary).is_empty());
    assert_eq!(core.input, before);
    assert_eq!(core.selection(), Some("b1"));
}

#[test]
fn commit_is_followed_by_a_snapshot() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary);
    core.on_pointer_move(pt(20.0, 10.0));
    let actions = core.on_pointer_up();
    let snapshot = actions
        .iter()
        .find_map(|a| match a {
            Action::Persist(s) => Some(s.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(snapshot.elements[0].position, pt(10.0, 0.0));
}

#[test]
fn removed_element_ends_gesture_without_commit() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.on_pointer_down(pt(10.0, 10.0), Button::Primary);
    core.registry.remove("b1");
    assert!(core.on_pointer_move(pt(20.0, 20.0)).is_empty());
    let actions = core.on_pointer_up();
    assert!(commits(&actions).is_empty());
    assert_eq!(core.input, InputState::Idle);
}

// =============================================================
// Selection and modes
// =============================================================

#[test]
fn empty_click_clears_selection() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.select(Some("b1"));
    let actions = core.on_pointer_down(pt(300.0, 300.0), Button::Primary);
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert_eq!(core.selection(), None);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn view_mode_ignores_pointer_input() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.set_edit_mode(false);
    assert!(core.on_pointer_down(pt(10.0, 10.0), Button::Primary).is_empty());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    assert!(core.on_pointer_down(pt(10.0, 10.0), Button::Secondary).is_empty());
    assert_eq!(core.selection(), None);
}

#[test]
fn toggling_edit_mode_clears_selection() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    core.select(Some("b1"));
    let actions = core.set_edit_mode(false);
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert!(core.scene().overlay.is_none());
}

#[test]
fn layer_select_does_not_start_a_gesture() {
    let mut core = core_with("b1", 0.0, 0.0, 50.0, 50.0);
    let actions = core.select(Some("b1"));
    assert_eq!(actions, vec![Action::SelectionChanged(Some("b1".into())), Action::RenderNeeded]);
    assert_eq!(core.input, InputState::Idle);
    assert!(core.select(Some("b1")).is_empty());
    assert!(core.select(Some("ghost")).len() == 2);
    assert_eq!(core.selection(), None);
}

// =============================================================
// Coordinates
// =============================================================

#[test]
fn gestures_use_canvas_local_units_under_scroll_and_zoom() {
    let mut core = core_with("b1", 100.0, 100.0, 80.0, 40.0);
    core.set_surface(Surface { origin_x: 200.0, origin_y: 50.0, scroll_x: 0.0, scroll_y: 300.0, zoom: 2.0 });
    // Canvas (110, 110) is viewport (420, -30).
    core.on_pointer_down(pt(420.0, -30.0), Button::Primary);
    core.on_pointer_move(pt(450.0, -40.0));
    let actions = core.on_pointer_up();
    assert_eq!(geometry(&core, "b1").0, pt(115.0, 95.0));
    let patch = &commits(&actions)[0].patch;
    assert_eq!(patch.left.as_deref(), Some("115px"));
    assert_eq!(patch.top.as_deref(), Some("95px"));
}

#[test]
fn degenerate_zoom_keeps_the_previous_zoom() {
    let mut core = core_with("b1", 100.0, 100.0, 80.0, 40.0);
    let surface = Surface { origin_x: 200.0, origin_y: 50.0, scroll_x: 0.0, scroll_y: 300.0, zoom: 2.0 };
    core.set_surface(surface);
    for zoom in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        core.set_surface(Surface { zoom, ..surface });
        assert_eq!(core.surface.zoom, 2.0);
    }

    core.on_pointer_down(pt(420.0, -30.0), Button::Primary);
    core.on_pointer_move(pt(450.0, -40.0));
    let actions = core.on_pointer_up();
    let (position, size) = geometry(&core, "b1");
    assert_eq!(position, pt(115.0, 95.0));
    assert!(size.width.is_finite() && size.height.is_finite());
    let patch = &commits(&actions)[0].patch;
    assert_eq!(patch.left.as_deref(), Some("115px"));
    assert_eq!(patch.top.as_deref(), Some("95px"));
}

#[test]
fn inspect_rounds_for_display() {
    let core = EngineCore::new(Registry::with_defaults());
    let info = core.inspect("button-001").unwrap();
    assert_eq!((info.x, info.y, info.z), (175.0, 137.0, 0));
    assert_eq!((info.width, info.height), (177.0, 280.0));
    assert!(core.inspect("ghost").is_none());
}
