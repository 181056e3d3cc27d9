//! Translation from raw key symbols to editing keys.
//!
//! Input-method services report keys as X11-style symbol values. Everything
//! below `SPECIAL_KEY_BASE` is a plain Unicode code point; values above it
//! name function keys. Only the handful of editing keys in the table are
//! recognized, so vendor-specific symbols never leak through as text.

use phf::phf_map;

/// Key event kind discriminator for a press, as services report it.
pub const KEY_PRESS: i32 = 6;
/// Key event kind discriminator for a release.
pub const KEY_RELEASE: i32 = 7;

/// First symbol value that does not encode a Unicode code point.
const SPECIAL_KEY_BASE: u32 = 0x0100_0000;

/// A key with editing meaning, decoupled from raw symbol values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Backspace,
    Enter,
    Insert,
    Delete,
    Pause,
    Home,
    End,
    Left,
    Up,
    Right,
    Down,
    PageUp,
    PageDown,
    /// A printable code point carried directly by the symbol.
    Char(char),
}

static EDITING_KEYS: phf::Map<u32, Key> = phf_map! {
    0x0100_0000u32 => Key::Escape,
    0x0100_0001u32 => Key::Tab,
    0x0100_0003u32 => Key::Backspace,
    0x0100_0004u32 => Key::Enter, // Return
    0x0100_0005u32 => Key::Enter, // keypad Enter
    0x0100_0006u32 => Key::Insert,
    0x0100_0007u32 => Key::Delete,
    0x0100_0008u32 => Key::Pause,
    0x0100_0010u32 => Key::Home,
    0x0100_0011u32 => Key::End,
    0x0100_0012u32 => Key::Left,
    0x0100_0013u32 => Key::Up,
    0x0100_0014u32 => Key::Right,
    0x0100_0015u32 => Key::Down,
    0x0100_0016u32 => Key::PageUp,
    0x0100_0017u32 => Key::PageDown,
};

/// Translate a raw key symbol into an editing key.
///
/// Returns `None` for unrecognized function keys and for code points that
/// are not printable.
pub fn translate(symbol: u32) -> Option<Key> {
    if let Some(key) = EDITING_KEYS.get(&symbol) {
        return Some(*key);
    }
    if symbol < SPECIAL_KEY_BASE {
        return char::from_u32(symbol)
            .filter(|ch| !ch.is_control())
            .map(Key::Char);
    }
    None
}
