//! Key-capture state machine for reassigning the hotkey.
//!
//! The gate is closed before `Capturing` is entered and reopened only after
//! `Idle` is restored, so no key event can be read both as a new hotkey and
//! as an overlay toggle.

use crate::{CaptureGate, HotkeyName, KeyPress, Settings, SettingsStore};

use tracing::{debug, info, instrument, warn};

/// Capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Global hotkey dispatch is live.
    Idle,
    /// Waiting for the key that becomes the new hotkey.
    Capturing {
        /// Hotkey active when capture began, restored on abort.
        previous: HotkeyName,
    },
}

/// Result of feeding an event to [`InputCapture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Not capturing, or the key cannot be a hotkey; nothing changed.
    Ignored,
    /// A new hotkey was accepted and persisted.
    Committed(HotkeyName),
    /// Capture was abandoned; the displayed value reverts to `restored`.
    Aborted {
        /// The hotkey that stays active.
        restored: HotkeyName,
    },
}

/// Owns the capture state and the writing side of the [`CaptureGate`].
///
/// Dropping it mid-capture reopens the gate.
#[derive(Debug)]
pub struct InputCapture {
    state: CaptureState,
    gate: CaptureGate,
}

impl InputCapture {
    /// Idle capture writing to `gate`.
    pub fn new(gate: CaptureGate) -> Self {
        Self {
            state: CaptureState::Idle,
            gate,
        }
    }

    /// The gate read by the hook thread.
    pub fn gate(&self) -> &CaptureGate {
        &self.gate
    }

    /// Current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Whether a capture is in progress.
    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing { .. })
    }

    /// Start capturing. Returns `false` if a capture was already running.
    #[instrument(skip(self))]
    pub fn begin(&mut self, current: &HotkeyName) -> bool {
        if self.is_capturing() {
            return false;
        }

        self.gate.suspend();
        self.state = CaptureState::Capturing { previous: *current };

        info!(previous = %current, "Hotkey capture started");

        true
    }

    /// Feed a key press from the focused capture field.
    ///
    /// Escape aborts. A key that can be a hotkey is committed into
    /// `settings` and persisted; a failed write is logged and the new
    /// hotkey stays active for this session.
    #[instrument(skip(self, settings, store))]
    pub fn handle_key(
        &mut self,
        key: &KeyPress,
        settings: &mut Settings,
        store: &SettingsStore,
    ) -> CaptureOutcome {
        let CaptureState::Capturing { previous } = self.state else {
            return CaptureOutcome::Ignored;
        };

        if key.is_escape() {
            self.finish();
            info!(restored = %previous, "Hotkey capture aborted by Escape");
            return CaptureOutcome::Aborted { restored: previous };
        }

        let Some(hotkey) = HotkeyName::from_key_press(key) else {
            debug!("Key cannot be a hotkey, still capturing");
            return CaptureOutcome::Ignored;
        };

        settings.hotkey = hotkey;
        if let Err(e) = store.save_hotkey(&hotkey) {
            warn!(error = %e, "Failed to persist new hotkey");
        }

        self.finish();
        info!(from = %previous, to = %hotkey, "Hotkey committed");

        CaptureOutcome::Committed(hotkey)
    }

    /// The capture field lost focus.
    #[instrument(skip(self))]
    pub fn focus_lost(&mut self) -> CaptureOutcome {
        let CaptureState::Capturing { previous } = self.state else {
            return CaptureOutcome::Ignored;
        };

        self.finish();
        info!(restored = %previous, "Hotkey capture aborted by focus loss");

        CaptureOutcome::Aborted { restored: previous }
    }

    fn finish(&mut self) {
        self.state = CaptureState::Idle;
        self.gate.resume();
    }
}

impl Drop for InputCapture {
    fn drop(&mut self) {
        if self.is_capturing() {
            self.gate.resume();
        }
    }
}
