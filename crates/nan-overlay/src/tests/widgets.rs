use crate::ui::{ButtonVisual, HeaderDrag, SettingsButton};

use eframe::egui::{Color32, pos2, vec2};

/// WHAT: Press and release inside the button is a click
/// WHY: This is how the settings panel is opened
#[test]
fn given_press_inside_when_released_inside_then_clicked() {
    // Given: A pointer hovering the button
    let mut button = SettingsButton::default();
    assert!(!button.update(true, false));
    assert_eq!(button.visual(), ButtonVisual::Hover);

    // When: Pressed and released inside
    assert!(!button.update(true, true));
    assert_eq!(button.visual(), ButtonVisual::Pressed);
    let clicked = button.update(true, false);

    // Then: One click, back to hover
    assert!(clicked);
    assert_eq!(button.visual(), ButtonVisual::Hover);
}

/// WHAT: A press that started outside does not click on release inside
/// WHY: Dragging onto the button must not open the panel
#[test]
fn given_press_outside_when_released_inside_then_not_clicked() {
    // Given: Pointer pressed away from the button
    let mut button = SettingsButton::default();
    button.update(false, true);

    // When: Released over the button
    let clicked = button.update(true, false);

    // Then: No click
    assert!(!clicked);
}

/// WHAT: A press inside released outside does not click
/// WHY: Users cancel a click by sliding off
#[test]
fn given_press_inside_when_released_outside_then_not_clicked() {
    // Given: Pointer pressed on the button
    let mut button = SettingsButton::default();
    button.update(true, true);

    // When: Released elsewhere
    let clicked = button.update(false, false);

    // Then: No click, normal look
    assert!(!clicked);
    assert_eq!(button.visual(), ButtonVisual::Normal);
}

/// WHAT: A locked button stays pressed and ignores clicks
/// WHY: The button mirrors the open panel
#[test]
fn given_locked_button_when_clicked_then_pressed_and_not_clicked() {
    // Given: A locked button
    let mut button = SettingsButton::default();
    button.lock();

    // When: Clicked
    button.update(true, true);
    let clicked = button.update(true, false);

    // Then: Still pressed, no click
    assert!(!clicked);
    assert_eq!(button.visual(), ButtonVisual::Pressed);

    // And: Unlocking restores hover
    button.unlock();
    assert_eq!(button.visual(), ButtonVisual::Hover);
}

/// WHAT: Button greys are 140, 204 and 230
/// WHY: Matches the overlay's visual design
#[test]
fn given_visuals_when_colored_then_expected_greys() {
    assert_eq!(ButtonVisual::Normal.color(), Color32::from_gray(140));
    assert_eq!(ButtonVisual::Hover.color(), Color32::from_gray(204));
    assert_eq!(ButtonVisual::Pressed.color(), Color32::from_gray(230));
}

/// WHAT: Header drags report movement deltas
/// WHY: The panel follows the pointer by the delta
#[test]
fn given_header_pressed_when_pointer_moves_then_delta_reported() {
    // Given: A pressed header
    let mut header = HeaderDrag::default();
    header.press(pos2(100.0, 100.0));
    assert!(header.is_dragging());
    assert_eq!(header.color(), Color32::from_gray(158));

    // When: The pointer moves twice
    let first = header.move_to(pos2(110.0, 95.0));
    let second = header.move_to(pos2(110.0, 95.0));

    // Then: The first move reports its delta, the still one nothing
    assert_eq!(first, Some(vec2(10.0, -5.0)));
    assert_eq!(second, None);
}

/// WHAT: Released headers report nothing
/// WHY: Moving the pointer after a drag must not move the panel
#[test]
fn given_header_released_when_pointer_moves_then_no_delta() {
    // Given: A header pressed then released
    let mut header = HeaderDrag::default();
    header.press(pos2(0.0, 0.0));
    header.release();

    // When/Then
    assert!(!header.is_dragging());
    assert_eq!(header.color(), Color32::from_gray(128));
    assert_eq!(header.move_to(pos2(5.0, 5.0)), None);
}
