//! The round settings button at the bottom of the overlay.

use eframe::egui::{self, Color32, Rect};

const CORNER_RADIUS: f32 = 12.0;
const ICON_INSET: f32 = 4.0;

/// Which of the three greys the button is painted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ButtonVisual {
    Normal,
    Hover,
    Pressed,
}

impl ButtonVisual {
    pub(crate) fn color(self) -> Color32 {
        match self {
            ButtonVisual::Normal => Color32::from_gray(140),
            ButtonVisual::Hover => Color32::from_gray(204),
            ButtonVisual::Pressed => Color32::from_gray(230),
        }
    }
}

/// Press/hover tracking for the settings button.
///
/// A click is a release inside the button after a press that also started
/// inside. While locked the button stays pressed and reports no clicks.
#[derive(Debug, Default)]
pub(crate) struct SettingsButton {
    locked: bool,
    armed: bool,
    last_inside: bool,
    last_down: bool,
}

impl SettingsButton {
    /// Feed the pointer state for this frame. Returns `true` on a click.
    pub(crate) fn update(&mut self, inside: bool, down: bool) -> bool {
        let pressed = down && !self.last_down;
        let released = !down && self.last_down;
        self.last_inside = inside;
        self.last_down = down;

        if pressed {
            self.armed = inside;
        }

        if !released {
            return false;
        }

        let clicked = self.armed && inside && !self.locked;
        self.armed = false;
        clicked
    }

    pub(crate) fn visual(&self) -> ButtonVisual {
        if self.locked || (self.armed && self.last_down && self.last_inside) {
            ButtonVisual::Pressed
        } else if self.last_inside {
            ButtonVisual::Hover
        } else {
            ButtonVisual::Normal
        }
    }

    /// Hold the button in its pressed look while the panel is open.
    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
        self.armed = false;
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.locked
    }

    /// Paint the button into `rect` and report whether it was clicked.
    pub(crate) fn show(
        &mut self,
        ui: &mut egui::Ui,
        rect: Rect,
        icon: Option<&egui::TextureHandle>,
    ) -> bool {
        let (pointer, down) =
            ui.input(|i| (i.pointer.latest_pos(), i.pointer.primary_down()));
        let inside = pointer.is_some_and(|p| rect.contains(p));
        let clicked = self.update(inside, down);

        let painter = ui.painter();
        painter.rect_filled(rect, CORNER_RADIUS, self.visual().color());
        if let Some(icon) = icon {
            painter.image(
                icon.id(),
                rect.shrink(ICON_INSET),
                Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        clicked
    }
}
