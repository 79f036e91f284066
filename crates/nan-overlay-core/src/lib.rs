//! NANOverlay core library
//!
//! Display-free state for the screen overlay: hotkey normalization and
//! matching, the persisted settings file, the key-capture gate and the
//! overlay fade lifecycle.
//!
//! # Example
//!
//! ```no_run
//! use nan_overlay_core::{CoreResult, KeyPress, SettingsStore, matches};
//!
//! fn main() -> CoreResult<()> {
//!     let store = SettingsStore::default_location()?;
//!     store.ensure_settings_file()?;
//!
//!     let settings = store.load();
//!     let pressed = KeyPress::Character('f');
//!     println!("toggle: {}", matches(&pressed, &settings.hotkey));
//!     Ok(())
//! }
//! ```

mod capture;
mod error;
mod hotkey;
mod overlay;
mod settings;

pub use {
    capture::{CaptureGate, CaptureOutcome, CaptureState, InputCapture},
    error::{CoreError, Result as CoreResult},
    hotkey::{HotkeyKey, HotkeyName, KeyPress, NamedKey, matches, should_dispatch},
    overlay::{
        DEFAULT_FADE_DURATION, Fade, OverlayEffect, OverlayLifecycle, OverlayState,
        PanelPosition, PanelState,
    },
    settings::{Settings, SettingsStore},
};

#[cfg(test)]
mod tests;
