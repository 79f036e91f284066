use crate::{
    CaptureGate, CaptureOutcome, CaptureState, HotkeyName, InputCapture, KeyPress, NamedKey,
    Settings, SettingsStore,
};

use tempfile::TempDir;

#[allow(clippy::unwrap_used)]
fn fixture() -> (TempDir, SettingsStore, Settings, InputCapture) {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.txt"));
    store.ensure_settings_file().unwrap();
    let settings = store.load();
    let capture = InputCapture::new(CaptureGate::new());
    (dir, store, settings, capture)
}

/// WHAT: Beginning capture suspends the gate before the state is Capturing
/// WHY: The hook thread must never see Capturing with an open gate
#[test]
fn given_idle_when_capture_begins_then_gate_suspended_and_capturing() {
    // Given: Idle capture
    let (_dir, _store, settings, mut capture) = fixture();
    assert!(!capture.gate().is_suspended());

    // When: Capture begins
    let started = capture.begin(&settings.hotkey);

    // Then: Capturing with the previous hotkey remembered, gate closed
    assert!(started);
    assert_eq!(
        capture.state(),
        CaptureState::Capturing {
            previous: settings.hotkey
        }
    );
    assert!(capture.gate().is_suspended());
}

/// WHAT: A second begin while capturing is refused
/// WHY: The remembered previous hotkey must not be overwritten
#[test]
#[allow(clippy::unwrap_used)]
fn given_capturing_when_begin_again_then_refused() {
    // Given: Capture in progress
    let (_dir, _store, settings, mut capture) = fixture();
    capture.begin(&settings.hotkey);

    // When: Beginning again with another hotkey
    let started = capture.begin(&HotkeyName::normalize("A").unwrap());

    // Then: Refused, previous unchanged
    assert!(!started);
    assert_eq!(
        capture.state(),
        CaptureState::Capturing {
            previous: settings.hotkey
        }
    );
}

/// WHAT: Escape aborts capture and keeps the active hotkey
/// WHY: Escape reverts to the pre-capture key
#[test]
fn given_capturing_when_escape_pressed_then_aborted_and_hotkey_unchanged() {
    // Given: Capture in progress
    let (_dir, store, mut settings, mut capture) = fixture();
    capture.begin(&settings.hotkey);

    // When: Escape arrives
    let outcome = capture.handle_key(&KeyPress::Named(NamedKey::Escape), &mut settings, &store);

    // Then: Aborted, hotkey still F5 in memory and on disk, gate open
    assert_eq!(
        outcome,
        CaptureOutcome::Aborted {
            restored: HotkeyName::default()
        }
    );
    assert_eq!(capture.state(), CaptureState::Idle);
    assert_eq!(settings.hotkey, HotkeyName::default());
    assert_eq!(store.load_hotkey(), HotkeyName::default());
    assert!(!capture.gate().is_suspended());
}

/// WHAT: A valid key commits, updates the settings and persists
/// WHY: The new hotkey must survive a restart
#[test]
#[allow(clippy::unwrap_used)]
fn given_capturing_when_valid_key_pressed_then_committed_and_persisted() {
    // Given: Capture in progress
    let (_dir, store, mut settings, mut capture) = fixture();
    capture.begin(&settings.hotkey);

    // When: 'k' is pressed
    let outcome = capture.handle_key(&KeyPress::Character('k'), &mut settings, &store);

    // Then: K committed everywhere, gate open again
    let k = HotkeyName::normalize("K").unwrap();
    assert_eq!(outcome, CaptureOutcome::Committed(k));
    assert_eq!(settings.hotkey, k);
    assert_eq!(store.load_hotkey(), k);
    assert_eq!(capture.state(), CaptureState::Idle);
    assert!(!capture.gate().is_suspended());
}

/// WHAT: Keys that cannot be hotkeys are ignored and capture continues
/// WHY: Pressing Shift or an arrow should not end the capture
#[test]
fn given_capturing_when_unsupported_key_pressed_then_still_capturing() {
    // Given: Capture in progress
    let (_dir, store, mut settings, mut capture) = fixture();
    capture.begin(&settings.hotkey);

    // When: Unsupported keys arrive
    let unidentified = capture.handle_key(&KeyPress::Unidentified, &mut settings, &store);
    let symbol = capture.handle_key(&KeyPress::Character('%'), &mut settings, &store);

    // Then: Ignored, still capturing, gate still closed
    assert_eq!(unidentified, CaptureOutcome::Ignored);
    assert_eq!(symbol, CaptureOutcome::Ignored);
    assert!(capture.is_capturing());
    assert!(capture.gate().is_suspended());
}

/// WHAT: Focus loss aborts capture
/// WHY: Clicking away from the field must not leave dispatch suspended
#[test]
fn given_capturing_when_focus_lost_then_aborted() {
    // Given: Capture in progress
    let (_dir, _store, settings, mut capture) = fixture();
    capture.begin(&settings.hotkey);

    // When: The field loses focus
    let outcome = capture.focus_lost();

    // Then: Aborted, gate open
    assert_eq!(
        outcome,
        CaptureOutcome::Aborted {
            restored: settings.hotkey
        }
    );
    assert!(!capture.gate().is_suspended());
}

/// WHAT: Events while idle are ignored
/// WHY: Only the focused capture field may reassign the hotkey
#[test]
fn given_idle_when_key_pressed_then_ignored() {
    // Given: Idle capture
    let (_dir, store, mut settings, mut capture) = fixture();

    // When: A key and a focus loss arrive
    let key = capture.handle_key(&KeyPress::Character('x'), &mut settings, &store);
    let focus = capture.focus_lost();

    // Then: Nothing happens
    assert_eq!(key, CaptureOutcome::Ignored);
    assert_eq!(focus, CaptureOutcome::Ignored);
    assert_eq!(settings.hotkey, HotkeyName::default());
}

/// WHAT: Dropping a capture mid-way reopens the gate
/// WHY: Tearing down the overlay must never leave the hotkey dead
#[test]
fn given_capturing_when_dropped_then_gate_reopened() {
    // Given: Shared gate and capture in progress
    let gate = CaptureGate::new();
    let mut capture = InputCapture::new(gate.clone());
    capture.begin(&HotkeyName::default());
    assert!(gate.is_suspended());

    // When: Dropped
    drop(capture);

    // Then: Gate open
    assert!(!gate.is_suspended());
}

/// WHAT: Commit survives an unwritable store
/// WHY: Write failures are logged, never fatal
#[test]
#[allow(clippy::unwrap_used)]
fn given_unwritable_store_when_committing_then_hotkey_still_active() {
    // Given: A store whose parent directory is a regular file
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store = SettingsStore::new(blocker.join("settings.txt"));
    let mut settings = Settings::default();
    let mut capture = InputCapture::new(CaptureGate::new());
    capture.begin(&settings.hotkey);

    // When: Committing 'm'
    let outcome = capture.handle_key(&KeyPress::Character('m'), &mut settings, &store);

    // Then: Committed in memory
    let m = HotkeyName::normalize("M").unwrap();
    assert_eq!(outcome, CaptureOutcome::Committed(m));
    assert_eq!(settings.hotkey, m);
}
