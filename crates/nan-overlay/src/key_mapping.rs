//! Fixed tables between toolkit keys, OS hotkey codes and core key types.

use nan_overlay_core::{HotkeyKey, HotkeyName, KeyPress, NamedKey};

use eframe::egui;
use global_hotkey::hotkey::Code;

const FUNCTION_CODES: [Code; 24] = [
    Code::F1,
    Code::F2,
    Code::F3,
    Code::F4,
    Code::F5,
    Code::F6,
    Code::F7,
    Code::F8,
    Code::F9,
    Code::F10,
    Code::F11,
    Code::F12,
    Code::F13,
    Code::F14,
    Code::F15,
    Code::F16,
    Code::F17,
    Code::F18,
    Code::F19,
    Code::F20,
    Code::F21,
    Code::F22,
    Code::F23,
    Code::F24,
];

/// Reduce an egui key to a [`KeyPress`].
pub(crate) fn key_press_from_egui(key: egui::Key) -> KeyPress {
    macro_rules! map_keys {
        (
            named { $( $named:ident => $core:expr ),* $(,)? }
            chars { $( $ch:ident => $c:literal ),* $(,)? }
        ) => {
            match key {
                $( egui::Key::$named => KeyPress::Named($core), )*
                $( egui::Key::$ch => KeyPress::Character($c), )*
                _ => KeyPress::Unidentified,
            }
        };
    }

    map_keys!(
        named {
            Escape => NamedKey::Escape, Enter => NamedKey::Enter,
            Space => NamedKey::Space, Tab => NamedKey::Tab,
            F1 => NamedKey::Function(1), F2 => NamedKey::Function(2),
            F3 => NamedKey::Function(3), F4 => NamedKey::Function(4),
            F5 => NamedKey::Function(5), F6 => NamedKey::Function(6),
            F7 => NamedKey::Function(7), F8 => NamedKey::Function(8),
            F9 => NamedKey::Function(9), F10 => NamedKey::Function(10),
            F11 => NamedKey::Function(11), F12 => NamedKey::Function(12),
            F13 => NamedKey::Function(13), F14 => NamedKey::Function(14),
            F15 => NamedKey::Function(15), F16 => NamedKey::Function(16),
            F17 => NamedKey::Function(17), F18 => NamedKey::Function(18),
            F19 => NamedKey::Function(19), F20 => NamedKey::Function(20),
            F21 => NamedKey::Function(21), F22 => NamedKey::Function(22),
            F23 => NamedKey::Function(23), F24 => NamedKey::Function(24),
        }
        chars {
            A => 'A', B => 'B', C => 'C', D => 'D', E => 'E', F => 'F',
            G => 'G', H => 'H', I => 'I', J => 'J', K => 'K', L => 'L',
            M => 'M', N => 'N', O => 'O', P => 'P', Q => 'Q', R => 'R',
            S => 'S', T => 'T', U => 'U', V => 'V', W => 'W', X => 'X',
            Y => 'Y', Z => 'Z',
            Num0 => '0', Num1 => '1', Num2 => '2', Num3 => '3', Num4 => '4',
            Num5 => '5', Num6 => '6', Num7 => '7', Num8 => '8', Num9 => '9',
        }
    )
}

/// OS-level key code to register for `hotkey`.
///
/// `None` only if the name falls outside the supported table, which
/// normalization rules out.
pub(crate) fn hotkey_code(hotkey: &HotkeyName) -> Option<Code> {
    match hotkey.key() {
        HotkeyKey::Named(NamedKey::Escape) => Some(Code::Escape),
        HotkeyKey::Named(NamedKey::Enter) => Some(Code::Enter),
        HotkeyKey::Named(NamedKey::Space) => Some(Code::Space),
        HotkeyKey::Named(NamedKey::Tab) => Some(Code::Tab),
        HotkeyKey::Named(NamedKey::Function(n)) => usize::from(n)
            .checked_sub(1)
            .and_then(|i| FUNCTION_CODES.get(i))
            .copied(),
        HotkeyKey::Character(c) => character_code(c),
    }
}

fn character_code(c: char) -> Option<Code> {
    let code = match c.to_ascii_uppercase() {
        'A' => Code::KeyA,
        'B' => Code::KeyB,
        'C' => Code::KeyC,
        'D' => Code::KeyD,
        'E' => Code::KeyE,
        'F' => Code::KeyF,
        'G' => Code::KeyG,
        'H' => Code::KeyH,
        'I' => Code::KeyI,
        'J' => Code::KeyJ,
        'K' => Code::KeyK,
        'L' => Code::KeyL,
        'M' => Code::KeyM,
        'N' => Code::KeyN,
        'O' => Code::KeyO,
        'P' => Code::KeyP,
        'Q' => Code::KeyQ,
        'R' => Code::KeyR,
        'S' => Code::KeyS,
        'T' => Code::KeyT,
        'U' => Code::KeyU,
        'V' => Code::KeyV,
        'W' => Code::KeyW,
        'X' => Code::KeyX,
        'Y' => Code::KeyY,
        'Z' => Code::KeyZ,
        '0' => Code::Digit0,
        '1' => Code::Digit1,
        '2' => Code::Digit2,
        '3' => Code::Digit3,
        '4' => Code::Digit4,
        '5' => Code::Digit5,
        '6' => Code::Digit6,
        '7' => Code::Digit7,
        '8' => Code::Digit8,
        '9' => Code::Digit9,
        _ => return None,
    };

    Some(code)
}
