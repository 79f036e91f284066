//! egui widgets for the overlay window.

mod header;
mod overlay_view;
mod settings_button;
mod settings_panel;
mod textures;

pub(crate) use {
    header::HeaderDrag,
    overlay_view::{OverlayView, ViewEvents},
    settings_button::SettingsButton,
    settings_panel::{PANEL_SIZE, PanelEvents, SettingsPanel},
};

#[cfg(test)]
pub(crate) use settings_button::ButtonVisual;
