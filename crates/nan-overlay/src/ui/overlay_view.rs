//! The full-window overlay: dimmed backdrop, banner, settings button and
//! the optional settings panel.

use crate::ui::{PANEL_SIZE, PanelEvents, SettingsButton, SettingsPanel, textures};

use nan_overlay_core::{HotkeyName, PanelState};

use eframe::egui::{self, Color32, Rect};
use tracing::{debug, warn};

// RGBA(23, 22, 22, 204), premultiplied.
const BACKDROP: Color32 = Color32::from_rgba_premultiplied(18, 18, 18, 204);
const BANNER_WIDTH_FRACTION: f32 = 0.13;
const BANNER_TOP_FRACTION: f32 = 0.03;
const BUTTON_SIZE: f32 = 40.0;
const BUTTON_CENTER_FRACTION: f32 = 0.97;

const BANNER_PNG: &[u8] = include_bytes!("../../resources/banner.png");
const SETTINGS_ICON_PNG: &[u8] = include_bytes!("../../resources/icons/settings.png");

/// Everything the user did in the overlay this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct ViewEvents {
    pub(crate) settings_clicked: bool,
    pub(crate) panel: PanelEvents,
    /// A primary click landed somewhere other than the hotkey field.
    pub(crate) clicked_outside_field: bool,
    /// Window size in points.
    pub(crate) screen: [f32; 2],
}

/// Live overlay contents. Exists only while the overlay window is shown;
/// dropping it frees its textures.
pub(crate) struct OverlayView {
    banner: Option<egui::TextureHandle>,
    settings_icon: Option<egui::TextureHandle>,
    button: SettingsButton,
    panel: SettingsPanel,
}

impl OverlayView {
    pub(crate) fn new(ctx: &egui::Context) -> Self {
        let banner = textures::load_texture(ctx, "banner", BANNER_PNG)
            .inspect_err(|e| warn!(error = %e, "Banner image unavailable"))
            .ok();
        let settings_icon = textures::load_texture(ctx, "settings_icon", SETTINGS_ICON_PNG)
            .inspect_err(|e| warn!(error = %e, "Settings icon unavailable"))
            .ok();

        debug!("Overlay view created");

        Self {
            banner,
            settings_icon,
            button: SettingsButton::default(),
            panel: SettingsPanel::default(),
        }
    }

    pub(crate) fn show(
        &mut self,
        ctx: &egui::Context,
        opacity: f32,
        panel: &PanelState,
        hotkey: &HotkeyName,
        capturing: bool,
    ) -> ViewEvents {
        if panel.is_open() {
            self.button.lock();
        } else if self.button.is_locked() {
            self.button.unlock();
        }

        let mut events = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.set_opacity(opacity);
                let screen = ui.max_rect();
                ui.painter().rect_filled(screen, 0.0, BACKDROP);

                if let Some(banner) = &self.banner {
                    ui.painter().image(
                        banner.id(),
                        banner_rect(screen, banner.size_vec2()),
                        Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }

                let settings_clicked =
                    self.button
                        .show(ui, button_rect(screen), self.settings_icon.as_ref());

                ViewEvents {
                    settings_clicked,
                    screen: [screen.width(), screen.height()],
                    ..ViewEvents::default()
                }
            })
            .inner;

        if panel.is_open() {
            let position = panel.position_or_centered(events.screen, PANEL_SIZE);
            events.panel = self.panel.show(ctx, position, opacity, hotkey, capturing);
        }

        events.clicked_outside_field = ctx.input(|i| i.pointer.primary_clicked())
            && !events.panel.field_clicked;

        events
    }
}

/// Banner scaled to a fraction of the window width, centred horizontally.
fn banner_rect(screen: Rect, texture_size: egui::Vec2) -> Rect {
    let width = screen.width() * BANNER_WIDTH_FRACTION;
    let height = if texture_size.x > 0.0 {
        width * texture_size.y / texture_size.x
    } else {
        0.0
    };

    Rect::from_min_size(
        egui::pos2(
            screen.center().x - width / 2.0,
            screen.top() + screen.height() * BANNER_TOP_FRACTION,
        ),
        egui::vec2(width, height),
    )
}

fn button_rect(screen: Rect) -> Rect {
    Rect::from_center_size(
        egui::pos2(
            screen.center().x,
            screen.top() + screen.height() * BUTTON_CENTER_FRACTION,
        ),
        egui::vec2(BUTTON_SIZE, BUTTON_SIZE),
    )
}
