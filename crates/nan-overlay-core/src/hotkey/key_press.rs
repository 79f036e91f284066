use crate::NamedKey;

/// A key press reported by the windowing toolkit or the OS hook, reduced
/// to what hotkey matching needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A key from the fixed named-key table.
    Named(NamedKey),
    /// A key that produced a printable character.
    Character(char),
    /// Anything else (modifiers, arrows, media keys...).
    Unidentified,
}

impl KeyPress {
    /// Whether this is the Escape key.
    pub fn is_escape(&self) -> bool {
        matches!(self, KeyPress::Named(NamedKey::Escape))
    }
}
