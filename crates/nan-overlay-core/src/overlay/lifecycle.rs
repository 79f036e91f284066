//! Overlay show/hide state machine.
//!
//! Every transition goes through a fade. Requests arriving while a fade is
//! running only update the desired end state; the running fade always
//! completes first, then the latest request is honoured. A close request
//! latches: toggles are dropped until the overlay is hidden again.

use crate::Fade;

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

/// Duration of both fade directions.
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(200);

/// Visibility of the single overlay instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    /// No overlay window exists.
    Hidden,
    /// Window exists, opacity rising to 1.
    FadingIn,
    /// Window fully shown.
    Visible,
    /// Window exists, opacity falling to 0.
    FadingOut,
}

/// Work the UI must carry out for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEffect {
    /// Build the overlay window at zero opacity and restore the settings
    /// panel from the store.
    Create,
    /// Fade-in completed.
    Shown,
    /// Fade-out completed: persist the panel state, release input grabs and
    /// destroy the window.
    Destroy,
}

/// Drives [`OverlayState`] from toggle/close requests and the clock.
#[derive(Debug, Clone)]
pub struct OverlayLifecycle {
    state: OverlayState,
    fade: Option<Fade>,
    want_visible: bool,
    closing: bool,
    fade_duration: Duration,
}

impl Default for OverlayLifecycle {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_DURATION)
    }
}

impl OverlayLifecycle {
    /// Hidden lifecycle with the given fade duration.
    pub fn new(fade_duration: Duration) -> Self {
        Self {
            state: OverlayState::Hidden,
            fade: None,
            want_visible: false,
            closing: false,
            fade_duration,
        }
    }

    /// Current state.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Whether an overlay window currently exists.
    pub fn has_window(&self) -> bool {
        self.state != OverlayState::Hidden
    }

    /// Whether a close was requested and the overlay is not hidden yet.
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Whether a fade is running.
    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    /// The hotkey (or tray action) asked to flip visibility.
    #[instrument(skip(self, now))]
    pub fn request_toggle(&mut self, now: Instant) -> Option<OverlayEffect> {
        if self.closing {
            debug!(state = ?self.state, "Toggle dropped while closing");
            return None;
        }

        match self.state {
            OverlayState::Hidden => {
                self.want_visible = true;
                Some(self.start_fade_in(now))
            }
            OverlayState::Visible => {
                self.want_visible = false;
                self.start_fade_out(now);
                None
            }
            OverlayState::FadingIn | OverlayState::FadingOut => {
                self.want_visible = !self.want_visible;
                debug!(
                    state = ?self.state,
                    want_visible = self.want_visible,
                    "Toggle queued behind running fade"
                );
                None
            }
        }
    }

    /// Escape or a termination request. Never destroys immediately.
    ///
    /// Until the fade-out completes, toggles are ignored: the same key press
    /// can arrive once through the window and once through the OS hook.
    #[instrument(skip(self, now))]
    pub fn request_close(&mut self, now: Instant) -> Option<OverlayEffect> {
        match self.state {
            OverlayState::Hidden => None,
            OverlayState::Visible => {
                self.want_visible = false;
                self.closing = true;
                self.start_fade_out(now);
                None
            }
            OverlayState::FadingIn | OverlayState::FadingOut => {
                self.want_visible = false;
                self.closing = true;
                debug!(state = ?self.state, "Close queued behind running fade");
                None
            }
        }
    }

    /// Advance the clock, completing fades and starting any queued one.
    pub fn tick(&mut self, now: Instant) -> Vec<OverlayEffect> {
        let mut effects = Vec::new();

        while let Some(fade) = self.fade {
            if !fade.is_complete(now) {
                break;
            }
            self.fade = None;

            match self.state {
                OverlayState::FadingIn => {
                    self.state = OverlayState::Visible;
                    effects.push(OverlayEffect::Shown);
                    info!("Overlay visible");
                    if !self.want_visible {
                        self.start_fade_out(now);
                    }
                }
                OverlayState::FadingOut => {
                    self.state = OverlayState::Hidden;
                    self.closing = false;
                    effects.push(OverlayEffect::Destroy);
                    info!("Overlay hidden");
                    if self.want_visible {
                        effects.push(self.start_fade_in(now));
                    }
                }
                OverlayState::Hidden | OverlayState::Visible => {}
            }
        }

        effects
    }

    /// Overlay opacity at `now`.
    pub fn opacity(&self, now: Instant) -> f32 {
        match (self.state, self.fade) {
            (_, Some(fade)) => fade.value(now),
            (OverlayState::Visible, None) => 1.0,
            _ => 0.0,
        }
    }

    fn start_fade_in(&mut self, now: Instant) -> OverlayEffect {
        self.state = OverlayState::FadingIn;
        self.fade = Some(Fade::new(0.0, 1.0, now, self.fade_duration));
        debug!("Fade in started");
        OverlayEffect::Create
    }

    fn start_fade_out(&mut self, now: Instant) {
        let from = self.opacity(now);
        self.state = OverlayState::FadingOut;
        self.fade = Some(Fade::new(from, 0.0, now, self.fade_duration));
        debug!(from, "Fade out started");
    }
}
