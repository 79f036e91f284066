//! Persisted settings: a flat `key=value` text file.

#[allow(clippy::module_inception)]
mod settings;
mod store;

pub use {settings::Settings, store::SettingsStore};

pub(crate) const HOTKEY_KEY: &str = "key";
pub(crate) const PANEL_OPEN_KEY: &str = "panel_open";
pub(crate) const SETTINGS_FILE_NAME: &str = "settings.txt";
