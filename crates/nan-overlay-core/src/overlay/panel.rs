/// Top-left corner of the settings panel, in overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPosition {
    /// Horizontal offset from the overlay's left edge.
    pub x: f32,
    /// Vertical offset from the overlay's top edge.
    pub y: f32,
}

/// Open/closed state and last position of the settings panel.
///
/// Outlives individual overlay windows so that reopening the overlay puts
/// the panel back where the user left it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelState {
    open: bool,
    position: Option<PanelPosition>,
}

impl PanelState {
    /// Closed panel with no remembered position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the panel. Returns whether the state changed.
    pub fn open(&mut self) -> bool {
        self.set_open(true)
    }

    /// Close the panel. Returns whether the state changed.
    pub fn close(&mut self) -> bool {
        self.set_open(false)
    }

    /// Set the open flag. Returns whether the state changed.
    pub fn set_open(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }

    /// Remembered position, if the panel has been placed before.
    pub fn position(&self) -> Option<PanelPosition> {
        self.position
    }

    /// Remember `position`.
    pub fn set_position(&mut self, position: PanelPosition) {
        self.position = Some(position);
    }

    /// Remembered position, or the panel centred on a `screen`-sized overlay.
    pub fn position_or_centered(&self, screen: [f32; 2], size: [f32; 2]) -> PanelPosition {
        self.position.unwrap_or(PanelPosition {
            x: ((screen[0] - size[0]) / 2.0).max(0.0).floor(),
            y: ((screen[1] - size[1]) / 2.0).max(0.0).floor(),
        })
    }

    /// Apply a header drag. Does nothing until the panel has a position.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        if let Some(position) = self.position.as_mut() {
            position.x += dx;
            position.y += dy;
        }
    }
}
