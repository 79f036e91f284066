mod key_press;
mod matcher;
mod name;

pub use {
    key_press::KeyPress,
    matcher::{matches, should_dispatch},
    name::{HotkeyKey, HotkeyName, NamedKey},
};
