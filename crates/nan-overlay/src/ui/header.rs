use eframe::egui::{Color32, Pos2, Vec2};

/// Drag tracking for the settings panel header.
#[derive(Debug, Default)]
pub(crate) struct HeaderDrag {
    last: Option<Pos2>,
}

impl HeaderDrag {
    pub(crate) fn press(&mut self, pos: Pos2) {
        self.last = Some(pos);
    }

    /// Pointer moved to `pos`. Returns the offset to apply to the panel.
    pub(crate) fn move_to(&mut self, pos: Pos2) -> Option<Vec2> {
        let last = self.last?;
        self.last = Some(pos);
        let delta = pos - last;
        (delta != Vec2::ZERO).then_some(delta)
    }

    pub(crate) fn release(&mut self) {
        self.last = None;
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Header fill, lightened while dragging.
    pub(crate) fn color(&self) -> Color32 {
        if self.is_dragging() {
            Color32::from_gray(158)
        } else {
            Color32::from_gray(128)
        }
    }
}
