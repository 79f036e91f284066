use crate::{
    HotkeyName,
    settings::{HOTKEY_KEY, PANEL_OPEN_KEY},
};

use tracing::warn;

/// Persisted user settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Key that toggles the overlay.
    pub hotkey: HotkeyName,
    /// Whether the settings panel was open when the overlay last closed.
    pub panel_open: bool,
}

/// Settings read back from disk, plus whether the file needs rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedSettings {
    pub(crate) settings: Settings,
    /// A recognised key was missing or held a value that had to be replaced.
    pub(crate) repaired: bool,
}

impl Settings {
    /// Parse file contents. A leading byte-order mark is skipped. Unknown keys
    /// and lines without `=` are ignored; missing or malformed values fall
    /// back to their defaults.
    pub(crate) fn parse(contents: &str) -> ParsedSettings {
        let mut hotkey = None;
        let mut panel_open = None;
        let mut repaired = false;

        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

        for line in contents.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            match key.trim() {
                HOTKEY_KEY => match HotkeyName::normalize(value) {
                    Ok(name) => hotkey = Some(name),
                    Err(e) => {
                        warn!(error = %e, "Stored hotkey rejected, falling back to default");
                        repaired = true;
                    }
                },
                PANEL_OPEN_KEY => match value.trim() {
                    "1" => panel_open = Some(true),
                    "0" => panel_open = Some(false),
                    other => {
                        warn!(value = other, "Stored panel state rejected, falling back to closed");
                        repaired = true;
                    }
                },
                _ => {}
            }
        }

        repaired |= hotkey.is_none() || panel_open.is_none();

        ParsedSettings {
            settings: Settings {
                hotkey: hotkey.unwrap_or_default(),
                panel_open: panel_open.unwrap_or_default(),
            },
            repaired,
        }
    }

    /// File representation, one `key=value` pair per line.
    pub fn to_file_contents(&self) -> String {
        format!(
            "{HOTKEY_KEY}={}\n{PANEL_OPEN_KEY}={}\n",
            self.hotkey,
            if self.panel_open { "1" } else { "0" }
        )
    }
}
