use super::*;

#[test]
fn default_state_is_idle() {
    let state = InputState::default();
    assert!(!state.is_active());
    assert_eq!(state.target(), None);
}

#[test]
fn active_states_report_their_target() {
    let dragging = InputState::Dragging {
        id: "b1".into(),
        origin_pointer: Point::new(1.0, 1.0),
        origin_position: Point::new(0.0, 0.0),
        origin_size: Size::new(40.0, 40.0),
    };
    assert!(dragging.is_active());
    assert_eq!(dragging.target(), Some("b1"));

    let resizing = InputState::Resizing {
        id: "b2".into(),
        handle: Handle::Left,
        origin_pointer: Point::new(1.0, 1.0),
        origin_position: Point::new(0.0, 0.0),
        origin_size: Size::new(40.0, 40.0),
    };
    assert_eq!(resizing.target(), Some("b2"));
}

#[test]
fn ui_starts_in_edit_mode_without_selection() {
    let ui = UiState::default();
    assert!(ui.edit_mode);
    assert_eq!(ui.selected_id, None);
}

#[test]
fn dom_button_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(3), Button::Secondary);
}
