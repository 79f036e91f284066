use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Core errors with source location tracking.
///
/// None of these are fatal to the overlay: callers recover by falling back
/// to defaults or to the last known good value.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Hotkey name is not a single alphanumeric key or a known named key.
    #[error("Invalid hotkey name: {input:?} {location}")]
    InvalidHotkeyName {
        /// The rejected input, as given.
        input: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Settings file exists but could not be read.
    #[error("Settings file unreadable at {path:?}: {source} {location}")]
    SettingsUnreadable {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Settings file or its directory could not be written.
    #[error("Settings file unwritable at {path:?}: {source} {location}")]
    SettingsUnwritable {
        /// Path that failed to be written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The platform reported no per-user configuration directory.
    #[error("No configuration directory available {location}")]
    NoConfigDirectory {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
