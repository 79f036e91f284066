use crate::{Fade, OverlayEffect, OverlayLifecycle, OverlayState, PanelPosition, PanelState};

use std::time::{Duration, Instant};

const FADE: Duration = Duration::from_millis(200);

fn visible_lifecycle(start: Instant) -> OverlayLifecycle {
    let mut lifecycle = OverlayLifecycle::new(FADE);
    lifecycle.request_toggle(start);
    lifecycle.tick(start + FADE);
    lifecycle
}

/// WHAT: Toggle from Hidden creates the window and fades in to Visible
/// WHY: Showing must never skip the FadingIn stage
#[test]
fn given_hidden_when_toggled_then_fades_in_to_visible() {
    // Given: Hidden overlay
    let start = Instant::now();
    let mut lifecycle = OverlayLifecycle::new(FADE);
    assert_eq!(lifecycle.state(), OverlayState::Hidden);

    // When: Toggled
    let effect = lifecycle.request_toggle(start);

    // Then: Window created, fading in from zero
    assert_eq!(effect, Some(OverlayEffect::Create));
    assert_eq!(lifecycle.state(), OverlayState::FadingIn);
    assert_eq!(lifecycle.opacity(start), 0.0);

    // Then: Halfway still fading in
    let halfway = start + FADE / 2;
    assert!(lifecycle.tick(halfway).is_empty());
    assert_eq!(lifecycle.state(), OverlayState::FadingIn);
    assert!((lifecycle.opacity(halfway) - 0.5).abs() < 0.01);

    // Then: Visible once the fade completes
    assert_eq!(lifecycle.tick(start + FADE), vec![OverlayEffect::Shown]);
    assert_eq!(lifecycle.state(), OverlayState::Visible);
    assert_eq!(lifecycle.opacity(start + FADE), 1.0);
}

/// WHAT: Toggle from Visible fades out before destroying
/// WHY: The window is never destroyed mid-animation
#[test]
fn given_visible_when_toggled_then_destroyed_only_after_fade_out() {
    // Given: Visible overlay
    let start = Instant::now();
    let mut lifecycle = visible_lifecycle(start);
    let t0 = start + FADE;

    // When: Toggled
    let effect = lifecycle.request_toggle(t0);

    // Then: Fading out, no destroy yet
    assert_eq!(effect, None);
    assert_eq!(lifecycle.state(), OverlayState::FadingOut);
    assert!(lifecycle.tick(t0 + FADE / 2).is_empty());
    assert!(lifecycle.has_window());

    // Then: Destroyed and Hidden after the fade
    assert_eq!(lifecycle.tick(t0 + FADE), vec![OverlayEffect::Destroy]);
    assert_eq!(lifecycle.state(), OverlayState::Hidden);
    assert!(!lifecycle.has_window());
}

/// WHAT: Escape/termination while Visible fades out, never destroys at once
/// WHY: Every close path completes the fade first
#[test]
fn given_visible_when_close_requested_then_fades_out() {
    // Given: Visible overlay
    let start = Instant::now();
    let mut lifecycle = visible_lifecycle(start);
    let t0 = start + FADE;

    // When: Close requested
    let effect = lifecycle.request_close(t0);

    // Then: FadingOut, then Destroy
    assert_eq!(effect, None);
    assert_eq!(lifecycle.state(), OverlayState::FadingOut);
    assert_eq!(lifecycle.tick(t0 + FADE), vec![OverlayEffect::Destroy]);
}

/// WHAT: Close while Hidden does nothing
/// WHY: Escape only matters when an overlay exists
#[test]
fn given_hidden_when_close_requested_then_nothing() {
    // Given: Hidden overlay
    let now = Instant::now();
    let mut lifecycle = OverlayLifecycle::new(FADE);

    // When/Then: Close is a no-op
    assert_eq!(lifecycle.request_close(now), None);
    assert!(lifecycle.tick(now + FADE).is_empty());
    assert_eq!(lifecycle.state(), OverlayState::Hidden);
}

/// WHAT: Toggle during fade-in finishes the fade, then fades out
/// WHY: Running fades are never interrupted; the latest request wins after
#[test]
fn given_fading_in_when_toggled_then_fade_completes_then_fades_out() {
    // Given: Fade-in in progress
    let start = Instant::now();
    let mut lifecycle = OverlayLifecycle::new(FADE);
    lifecycle.request_toggle(start);

    // When: Toggled mid-fade
    let effect = lifecycle.request_toggle(start + FADE / 4);

    // Then: Fade-in keeps running
    assert_eq!(effect, None);
    assert_eq!(lifecycle.state(), OverlayState::FadingIn);

    // Then: On completion it is shown, then immediately starts fading out
    let done = start + FADE;
    assert_eq!(lifecycle.tick(done), vec![OverlayEffect::Shown]);
    assert_eq!(lifecycle.state(), OverlayState::FadingOut);
    assert_eq!(lifecycle.opacity(done), 1.0);

    // Then: Fade-out ends Hidden
    assert_eq!(lifecycle.tick(done + FADE), vec![OverlayEffect::Destroy]);
    assert_eq!(lifecycle.state(), OverlayState::Hidden);
}

/// WHAT: Toggle during fade-out finishes the fade, then recreates the window
/// WHY: The old window is destroyed before a new one is built
#[test]
fn given_fading_out_when_toggled_then_destroyed_then_recreated() {
    // Given: Fade-out in progress
    let start = Instant::now();
    let mut lifecycle = visible_lifecycle(start);
    let t0 = start + FADE;
    lifecycle.request_toggle(t0);

    // When: Toggled mid-fade
    assert_eq!(lifecycle.request_toggle(t0 + FADE / 2), None);

    // Then: Destroy then Create, in that order, fading in again
    assert_eq!(
        lifecycle.tick(t0 + FADE),
        vec![OverlayEffect::Destroy, OverlayEffect::Create]
    );
    assert_eq!(lifecycle.state(), OverlayState::FadingIn);
}

/// WHAT: Two toggles during a fade cancel each other
/// WHY: Only the latest pending request is honoured
#[test]
fn given_fading_in_when_toggled_twice_then_stays_visible() {
    // Given: Fade-in in progress
    let start = Instant::now();
    let mut lifecycle = OverlayLifecycle::new(FADE);
    lifecycle.request_toggle(start);

    // When: Toggled twice before completion
    lifecycle.request_toggle(start + FADE / 4);
    lifecycle.request_toggle(start + FADE / 2);

    // Then: Ends Visible
    assert_eq!(lifecycle.tick(start + FADE), vec![OverlayEffect::Shown]);
    assert_eq!(lifecycle.state(), OverlayState::Visible);
}

/// WHAT: Close during fade-in is queued until the fade completes
/// WHY: Escape pressed right after opening still closes the overlay
#[test]
fn given_fading_in_when_close_requested_then_closes_after_fade() {
    // Given: Fade-in in progress
    let start = Instant::now();
    let mut lifecycle = OverlayLifecycle::new(FADE);
    lifecycle.request_toggle(start);

    // When: Close requested mid-fade
    assert_eq!(lifecycle.request_close(start + FADE / 2), None);

    // Then: Shown, then fade-out to Hidden
    assert_eq!(lifecycle.tick(start + FADE), vec![OverlayEffect::Shown]);
    assert_eq!(
        lifecycle.tick(start + FADE * 2),
        vec![OverlayEffect::Destroy]
    );
}

/// WHAT: Zero-length fades still pass through every stage in one tick
/// WHY: Effects must stay ordered even without animation time
#[test]
fn given_zero_duration_when_toggled_mid_fade_then_effects_ordered() {
    // Given: Instant fades with a queued close
    let now = Instant::now();
    let mut lifecycle = OverlayLifecycle::new(Duration::ZERO);
    assert_eq!(lifecycle.request_toggle(now), Some(OverlayEffect::Create));
    lifecycle.request_close(now);

    // When: One tick
    let effects = lifecycle.tick(now);

    // Then: Shown then Destroy, ending Hidden
    assert_eq!(effects, vec![OverlayEffect::Shown, OverlayEffect::Destroy]);
    assert_eq!(lifecycle.state(), OverlayState::Hidden);
}

/// WHAT: Fade values interpolate linearly and clamp
/// WHY: Opacity must stay within 0..=1 regardless of clock skew
#[test]
fn given_fade_when_sampled_then_linear_and_clamped() {
    // Given: 0 -> 1 over 200ms
    let start = Instant::now();
    let fade = Fade::new(0.0, 1.0, start, FADE);

    // Then: Linear inside, clamped past the end
    assert_eq!(fade.value(start), 0.0);
    assert!((fade.value(start + FADE / 4) - 0.25).abs() < 0.01);
    assert_eq!(fade.value(start + FADE * 3), 1.0);
    assert!(!fade.is_complete(start + FADE / 2));
    assert!(fade.is_complete(start + FADE));
    assert_eq!(fade.target(), 1.0);
}

/// WHAT: Panel centres until placed, then remembers drags
/// WHY: Reopening the overlay restores the panel where it was left
#[test]
fn given_panel_when_placed_and_dragged_then_position_remembered() {
    // Given: Unplaced panel
    let mut panel = PanelState::new();
    let centred = panel.position_or_centered([1920.0, 1080.0], [350.0, 350.0]);
    assert_eq!(centred, PanelPosition { x: 785.0, y: 365.0 });

    // When: Placed and dragged
    panel.move_by(10.0, 10.0);
    assert_eq!(panel.position(), None);
    panel.set_position(centred);
    panel.move_by(15.0, -5.0);

    // Then: Dragged position used instead of centring
    assert_eq!(
        panel.position_or_centered([1920.0, 1080.0], [350.0, 350.0]),
        PanelPosition { x: 800.0, y: 360.0 }
    );
}

/// WHAT: Open/close report whether the state changed
/// WHY: The store is only written on actual changes
#[test]
fn given_panel_when_opened_and_closed_then_changes_reported() {
    let mut panel = PanelState::new();

    assert!(panel.open());
    assert!(!panel.open());
    assert!(panel.is_open());
    assert!(panel.close());
    assert!(!panel.close());
    assert!(!panel.set_open(false));
}

/// WHAT: A toggle arriving after a close during the fade-out is dropped
/// WHY: One key press can reach both the window and the OS hook; it must not reopen
#[test]
fn given_close_requested_when_toggle_follows_during_fade_out_then_stays_hidden() {
    // Given: Visible overlay closed by the window path
    let start = Instant::now();
    let mut lifecycle = visible_lifecycle(start);
    let t0 = start + FADE;
    assert_eq!(lifecycle.request_close(t0), None);
    assert!(lifecycle.is_closing());

    // When: The OS toggle for the same press is drained a frame later
    let effect = lifecycle.request_toggle(t0 + Duration::from_millis(16));

    // Then: Fade-out finishes into Hidden without a new Create
    assert_eq!(effect, None);
    assert_eq!(lifecycle.tick(t0 + FADE), vec![OverlayEffect::Destroy]);
    assert!(lifecycle.tick(t0 + FADE * 3).is_empty());
    assert_eq!(lifecycle.state(), OverlayState::Hidden);
    assert!(!lifecycle.is_closing());
}

/// WHAT: A close during fade-in also ignores a following toggle
/// WHY: The latch covers both fade directions until Hidden is reached
#[test]
fn given_close_during_fade_in_when_toggled_then_still_ends_hidden() {
    // Given: Fade-in in progress, then a close
    let start = Instant::now();
    let mut lifecycle = OverlayLifecycle::new(FADE);
    lifecycle.request_toggle(start);
    lifecycle.request_close(start + FADE / 4);

    // When: A toggle arrives
    assert_eq!(lifecycle.request_toggle(start + FADE / 2), None);

    // Then: Shown, then Destroy, ending Hidden
    assert_eq!(lifecycle.tick(start + FADE), vec![OverlayEffect::Shown]);
    assert_eq!(
        lifecycle.tick(start + FADE * 2),
        vec![OverlayEffect::Destroy]
    );
    assert_eq!(lifecycle.state(), OverlayState::Hidden);
}

/// WHAT: Once hidden after a close, toggling shows the overlay again
/// WHY: The close latch must not outlive the fade-out
#[test]
fn given_closed_and_hidden_when_toggled_then_created_again() {
    // Given: Overlay closed and fully faded out
    let start = Instant::now();
    let mut lifecycle = visible_lifecycle(start);
    let t0 = start + FADE;
    lifecycle.request_close(t0);
    lifecycle.tick(t0 + FADE);

    // When: Toggled
    let effect = lifecycle.request_toggle(t0 + FADE * 2);

    // Then: A new window fades in
    assert_eq!(effect, Some(OverlayEffect::Create));
    assert_eq!(lifecycle.state(), OverlayState::FadingIn);
}
