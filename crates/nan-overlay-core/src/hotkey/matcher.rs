//! Matching of key presses against the configured hotkey.

use crate::{CaptureGate, HotkeyKey, HotkeyName, KeyPress};

use tracing::trace;

/// Returns true iff `key` denotes `hotkey`.
///
/// Named keys match by identity, characters match case-insensitively.
/// Total: unrecognized presses simply never match.
pub fn matches(key: &KeyPress, hotkey: &HotkeyName) -> bool {
    match (key, hotkey.key()) {
        (KeyPress::Named(pressed), HotkeyKey::Named(wanted)) => *pressed == wanted,
        (KeyPress::Character(pressed), HotkeyKey::Character(wanted)) => {
            pressed.eq_ignore_ascii_case(&wanted)
        }
        _ => false,
    }
}

/// Like [`matches`], but never fires while a new hotkey is being captured.
pub fn should_dispatch(key: &KeyPress, hotkey: &HotkeyName, gate: &CaptureGate) -> bool {
    if gate.is_suspended() {
        trace!(?key, "Hotkey dispatch suspended during capture");
        return false;
    }

    matches(key, hotkey)
}
