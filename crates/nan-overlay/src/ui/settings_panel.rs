//! The draggable settings panel.

use crate::ui::HeaderDrag;

use nan_overlay_core::{HotkeyName, PanelPosition};

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, StrokeKind, Vec2};

/// Panel width and height.
pub(crate) const PANEL_SIZE: [f32; 2] = [350.0, 350.0];

const BACKGROUND: Color32 = Color32::from_rgb(0xB3, 0xB3, 0xB3);
const BORDER_WIDTH: f32 = 2.0;
const HEADER_HEIGHT: f32 = 30.0;
const CLOSE_SIZE: f32 = 24.0;
const CLOSE_MARGIN: f32 = 12.0;
const CONTENT_MARGIN: f32 = 20.0;
const FIELD_HEIGHT: f32 = 36.0;
const CAPTURE_PROMPT: &str = "Press a key…";
const HINT: &str = "Click the field, then press a key.\nEsc cancels.";

/// What happened on the panel this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct PanelEvents {
    pub(crate) close_clicked: bool,
    pub(crate) field_clicked: bool,
    pub(crate) drag: Option<Vec2>,
}

/// Settings panel widget. Holds only interaction state; what is shown
/// comes in through [`show`](Self::show).
#[derive(Debug, Default)]
pub(crate) struct SettingsPanel {
    header: HeaderDrag,
}

impl SettingsPanel {
    pub(crate) fn show(
        &mut self,
        ctx: &egui::Context,
        position: PanelPosition,
        opacity: f32,
        hotkey: &HotkeyName,
        capturing: bool,
    ) -> PanelEvents {
        egui::Area::new(egui::Id::new("nan_overlay_settings_panel"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(position.x, position.y))
            .show(ctx, |ui| {
                ui.set_opacity(opacity);
                self.contents(ui, hotkey, capturing)
            })
            .inner
    }

    fn contents(&mut self, ui: &mut egui::Ui, hotkey: &HotkeyName, capturing: bool) -> PanelEvents {
        let (rect, _) = ui.allocate_exact_size(Vec2::from(PANEL_SIZE), Sense::hover());
        let mut events = PanelEvents::default();

        let header_rect = Rect::from_min_size(rect.min, egui::vec2(rect.width(), HEADER_HEIGHT));
        let close_rect = Rect::from_center_size(
            egui::pos2(
                header_rect.right() - CLOSE_MARGIN - CLOSE_SIZE / 2.0,
                header_rect.center().y,
            ),
            egui::vec2(CLOSE_SIZE, CLOSE_SIZE),
        );
        let field_rect = Rect::from_min_size(
            egui::pos2(
                rect.left() + CONTENT_MARGIN,
                header_rect.bottom() + CONTENT_MARGIN * 2.0,
            ),
            egui::vec2(rect.width() - CONTENT_MARGIN * 2.0, FIELD_HEIGHT),
        );

        let header = ui.interact(header_rect, ui.id().with("header"), Sense::drag());
        let close = ui.interact(close_rect, ui.id().with("close"), Sense::click());
        let field = ui.interact(field_rect, ui.id().with("hotkey_field"), Sense::click());

        if header.drag_started()
            && let Some(pos) = header.interact_pointer_pos()
        {
            self.header.press(pos);
        }
        if header.dragged()
            && let Some(pos) = header.interact_pointer_pos()
        {
            events.drag = self.header.move_to(pos);
        }
        if header.drag_stopped() {
            self.header.release();
        }

        events.close_clicked = close.clicked();
        events.field_clicked = field.clicked();

        let painter = ui.painter();
        painter.rect(
            rect,
            0.0,
            BACKGROUND,
            Stroke::new(BORDER_WIDTH, Color32::BLACK),
            StrokeKind::Inside,
        );
        painter.rect_filled(header_rect.shrink(BORDER_WIDTH), 0.0, self.header.color());
        painter.text(
            egui::pos2(rect.left() + CONTENT_MARGIN / 2.0, header_rect.center().y),
            Align2::LEFT_CENTER,
            "Settings",
            FontId::proportional(15.0),
            Color32::BLACK,
        );

        let close_fill = if close.hovered() {
            Color32::from_gray(190)
        } else {
            Color32::from_gray(170)
        };
        painter.rect_filled(close_rect, 3.0, close_fill);
        painter.text(
            close_rect.center(),
            Align2::CENTER_CENTER,
            "X",
            FontId::proportional(16.0),
            Color32::BLACK,
        );

        painter.text(
            egui::pos2(field_rect.left(), field_rect.top() - 6.0),
            Align2::LEFT_BOTTOM,
            "Overlay hotkey",
            FontId::proportional(14.0),
            Color32::BLACK,
        );

        let field_stroke = if capturing {
            Stroke::new(2.0, Color32::from_rgb(40, 90, 200))
        } else {
            Stroke::new(1.0, Color32::from_gray(60))
        };
        painter.rect(field_rect, 4.0, Color32::WHITE, field_stroke, StrokeKind::Inside);

        let label = if capturing {
            CAPTURE_PROMPT.to_string()
        } else {
            hotkey.to_string()
        };
        painter.text(
            field_rect.center(),
            Align2::CENTER_CENTER,
            label,
            FontId::monospace(16.0),
            Color32::BLACK,
        );

        painter.text(
            egui::pos2(field_rect.left(), field_rect.bottom() + CONTENT_MARGIN),
            Align2::LEFT_TOP,
            HINT,
            FontId::proportional(13.0),
            Color32::from_gray(40),
        );

        events
    }
}
