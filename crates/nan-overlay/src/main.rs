//! NANOverlay: a translucent screen overlay toggled by a global hotkey.

mod app_command;
mod background;
mod error;
mod hotkey_handler;
mod hotkey_registrar;
mod key_mapping;
mod logging;
mod overlay_app;
#[cfg(test)]
mod tests;
mod tray_manager;
mod ui;
mod ui_proxy;

pub(crate) use {
    app_command::AppCommand,
    background::BackgroundRuntime,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    hotkey_registrar::HotkeyRegistrar,
    overlay_app::OverlayApp,
    tray_manager::{TrayManager, TrayRouter},
    ui_proxy::UiProxy,
};

use crate::overlay_app::PARKED_POSITION;

use nan_overlay_core::SettingsStore;

use std::panic::Location;

use eframe::egui;
use error_location::ErrorLocation;
use tracing::{error, info, warn};

const APP_NAME: &str = "NANOverlay";
const FALLBACK_SETTINGS_FILE: &str = "settings.txt";

/// Application entry point.
fn main() {
    logging::init();

    if let Err(e) = run() {
        error!(error = %e, "Overlay exited with an error");
        std::process::exit(1);
    }
}

#[track_caller]
fn run() -> AppResult<()> {
    let store = match SettingsStore::default_location() {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "Using settings file in the working directory");
            SettingsStore::new(FALLBACK_SETTINGS_FILE)
        }
    };

    if let Err(e) = store.ensure_settings_file() {
        warn!(error = %e, "Settings file could not be created");
    }
    let settings = store.load();
    info!(path = ?store.path(), hotkey = %settings.hotkey, "Settings loaded");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_transparent(true)
            .with_decorations(false)
            .with_always_on_top()
            .with_taskbar(false)
            .with_inner_size([1.0, 1.0])
            .with_position(PARKED_POSITION),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(OverlayApp::new(cc, store, settings)))),
    )
    .map_err(|e| AppError::Ui {
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
