//! System tray icon with a show/hide and close menu.
//!
//! The [`TrayManager`] itself is `!Send` and stays on the UI thread.
//! Menu clicks arrive on the global [`MenuEvent`] channel and are turned into
//! [`AppCommand`]s by a [`TrayRouter`] on the background runtime.

use crate::{AppCommand, AppError, AppResult, UiProxy};

use nan_overlay_core::HotkeyName;

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const TRAY_ICON_PNG: &[u8] = include_bytes!("../resources/icons/tray.png");

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    toggle_item_id: MenuId,
    close_item_id: MenuId,
}

impl TrayManager {
    /// Create the tray icon, its menu, and a tooltip naming `hotkey`.
    #[track_caller]
    #[instrument(fields(hotkey = %hotkey))]
    pub fn new(hotkey: &HotkeyName) -> AppResult<Self> {
        let menu = Menu::new();

        let toggle_item = MenuItem::new("Show / Hide overlay", true, None);
        let close_item = MenuItem::new("Close", true, None);

        let toggle_id = toggle_item.id().clone();
        let close_id = close_item.id().clone();

        menu.append(&toggle_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add toggle menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        menu.append(&close_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add close menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let icon = Self::load_icon()?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(hotkey))
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            toggle_item_id: toggle_id,
            close_item_id: close_id,
        })
    }

    /// Point the tooltip at the newly active hotkey.
    #[track_caller]
    #[instrument(skip(self), fields(hotkey = %hotkey))]
    pub fn set_hotkey(&mut self, hotkey: &HotkeyName) -> AppResult<()> {
        self.tray_icon
            .set_tooltip(Some(tooltip(hotkey)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Decode the embedded PNG into a tray icon.
    #[track_caller]
    fn load_icon() -> AppResult<Icon> {
        let img = image::load_from_memory(TRAY_ICON_PNG).map_err(|e| AppError::ResourceError {
            reason: format!("Failed to decode embedded icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the show/hide menu item ID.
    pub fn toggle_item_id(&self) -> &MenuId {
        &self.toggle_item_id
    }

    /// Get the close menu item ID.
    pub fn close_item_id(&self) -> &MenuId {
        &self.close_item_id
    }
}

pub(crate) fn tooltip(hotkey: &HotkeyName) -> String {
    format!("NANOverlay - {}", hotkey)
}

/// Turns tray menu clicks into [`AppCommand`]s for the UI thread.
pub struct TrayRouter {
    toggle_id: MenuId,
    close_id: MenuId,
    proxy: UiProxy,
}

impl TrayRouter {
    /// Route clicks on the given menu items through `proxy`.
    pub fn new(toggle_id: MenuId, close_id: MenuId, proxy: UiProxy) -> Self {
        Self {
            toggle_id,
            close_id,
            proxy,
        }
    }

    /// Map a menu event to the command it stands for.
    pub(crate) fn route(&self, event: &MenuEvent) -> Option<AppCommand> {
        if event.id == self.toggle_id {
            Some(AppCommand::ToggleOverlay)
        } else if event.id == self.close_id {
            Some(AppCommand::Quit)
        } else {
            None
        }
    }

    /// Forward menu events until a shutdown signal is received.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        // MenuEvent::receiver() is a crossbeam receiver; bridge it like the
        // hotkey channel. The task ends on the first send after menu_rx drops.
        let (menu_tx, mut menu_rx) = mpsc::channel(32);
        let handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if menu_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Tray router shutting down");
                    break;
                }
                Some(event) = menu_rx.recv() => {
                    match self.route(&event) {
                        Some(command) => {
                            info!(?command, "Tray menu selected");
                            if let Err(e) = self.proxy.send(command) {
                                error!(error = ?e, "Failed to forward tray command");
                            }
                        }
                        None => debug!(id = ?event.id, "Ignoring unknown tray menu item"),
                    }
                }
            }
        }

        drop(menu_rx);

        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => debug!("Tray event forwarder did not stop within timeout"),
        }

        Ok(())
    }
}
