use crate::{CoreError, CoreResult, KeyPress};

use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;

const MAX_FUNCTION_KEY: u8 = 24;

/// Keys addressed by name rather than by the character they produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    /// `ESC`
    Escape,
    /// `ENTER`
    Enter,
    /// `SPACE`
    Space,
    /// `TAB`
    Tab,
    /// `F1` through `F24`.
    Function(u8),
}

impl NamedKey {
    /// Every named key a hotkey may use.
    pub fn all() -> impl Iterator<Item = NamedKey> {
        [
            NamedKey::Escape,
            NamedKey::Enter,
            NamedKey::Space,
            NamedKey::Tab,
        ]
        .into_iter()
        .chain((1..=MAX_FUNCTION_KEY).map(NamedKey::Function))
    }

    fn parse(upper: &str) -> Option<Self> {
        match upper {
            "ESC" | "ESCAPE" => Some(NamedKey::Escape),
            "ENTER" | "RETURN" => Some(NamedKey::Enter),
            "SPACE" => Some(NamedKey::Space),
            "TAB" => Some(NamedKey::Tab),
            _ => {
                let digits = upper.strip_prefix('F')?;
                if digits.is_empty()
                    || digits.starts_with('0')
                    || !digits.bytes().all(|b| b.is_ascii_digit())
                {
                    return None;
                }
                let n = digits.parse::<u8>().ok()?;
                NamedKey::Function(n).is_supported().then_some(NamedKey::Function(n))
            }
        }
    }

    fn is_supported(&self) -> bool {
        match self {
            NamedKey::Function(n) => (1..=MAX_FUNCTION_KEY).contains(n),
            _ => true,
        }
    }
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamedKey::Escape => f.write_str("ESC"),
            NamedKey::Enter => f.write_str("ENTER"),
            NamedKey::Space => f.write_str("SPACE"),
            NamedKey::Tab => f.write_str("TAB"),
            NamedKey::Function(n) => write!(f, "F{n}"),
        }
    }
}

/// The key a [`HotkeyName`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyKey {
    /// A named key.
    Named(NamedKey),
    /// An uppercase ASCII letter or a digit.
    Character(char),
}

/// Canonical name of the single key that toggles the overlay.
///
/// Only obtainable through [`HotkeyName::normalize`] or
/// [`HotkeyName::from_key_press`], so it always holds one of the canonical
/// forms: `A`-`Z`, `0`-`9`, `ESC`, `ENTER`, `SPACE`, `TAB`, `F1`-`F24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyName {
    key: HotkeyKey,
}

impl HotkeyName {
    /// Trim and uppercase `input`, accepting it iff it is a named key or a
    /// single alphanumeric character.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidHotkeyName`] for anything else.
    #[track_caller]
    pub fn normalize(input: &str) -> CoreResult<Self> {
        let upper = input.trim().to_ascii_uppercase();

        if let Some(named) = NamedKey::parse(&upper) {
            return Ok(Self {
                key: HotkeyKey::Named(named),
            });
        }

        let mut chars = upper.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => Ok(Self {
                key: HotkeyKey::Character(c),
            }),
            _ => Err(CoreError::InvalidHotkeyName {
                input: input.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Hotkey denoted by a pressed key, if that key can be a hotkey.
    pub fn from_key_press(key: &KeyPress) -> Option<Self> {
        let key = match key {
            KeyPress::Named(named) if named.is_supported() => HotkeyKey::Named(*named),
            KeyPress::Character(c) if c.is_ascii_alphanumeric() => {
                HotkeyKey::Character(c.to_ascii_uppercase())
            }
            _ => return None,
        };

        Some(Self { key })
    }

    /// The key this name refers to.
    pub fn key(&self) -> HotkeyKey {
        self.key
    }

    /// The key press that triggers this hotkey.
    pub fn key_press(&self) -> KeyPress {
        match self.key {
            HotkeyKey::Named(named) => KeyPress::Named(named),
            HotkeyKey::Character(c) => KeyPress::Character(c),
        }
    }
}

impl Default for HotkeyName {
    fn default() -> Self {
        Self {
            key: HotkeyKey::Named(NamedKey::Function(5)),
        }
    }
}

impl fmt::Display for HotkeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            HotkeyKey::Named(named) => write!(f, "{named}"),
            HotkeyKey::Character(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for HotkeyName {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        Self::normalize(s)
    }
}
