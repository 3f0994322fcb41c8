//! Host key codes and modifier masks.
//!
//! Key codes are USB HID usage IDs (the same values SDL reports as
//! scancodes), so the named constants cover the keys a frontend binds by
//! default; anything else still works and is described as `Key#n`.

/// Host scancode.
pub type KeyCode = u32;

/// USB HID usage IDs for commonly bound keys.
pub mod key {
    pub const A: u32 = 4;
    pub const B: u32 = 5;
    pub const C: u32 = 6;
    pub const D: u32 = 7;
    pub const E: u32 = 8;
    pub const F: u32 = 9;
    pub const G: u32 = 10;
    pub const H: u32 = 11;
    pub const I: u32 = 12;
    pub const J: u32 = 13;
    pub const K: u32 = 14;
    pub const L: u32 = 15;
    pub const M: u32 = 16;
    pub const N: u32 = 17;
    pub const O: u32 = 18;
    pub const P: u32 = 19;
    pub const Q: u32 = 20;
    pub const R: u32 = 21;
    pub const S: u32 = 22;
    pub const T: u32 = 23;
    pub const U: u32 = 24;
    pub const V: u32 = 25;
    pub const W: u32 = 26;
    pub const X: u32 = 27;
    pub const Y: u32 = 28;
    pub const Z: u32 = 29;
    pub const NUM1: u32 = 30;
    pub const NUM2: u32 = 31;
    pub const NUM3: u32 = 32;
    pub const NUM4: u32 = 33;
    pub const NUM5: u32 = 34;
    pub const NUM6: u32 = 35;
    pub const NUM7: u32 = 36;
    pub const NUM8: u32 = 37;
    pub const NUM9: u32 = 38;
    pub const NUM0: u32 = 39;
    pub const RETURN: u32 = 40;
    pub const ESCAPE: u32 = 41;
    pub const BACKSPACE: u32 = 42;
    pub const TAB: u32 = 43;
    pub const SPACE: u32 = 44;
    pub const F1: u32 = 58;
    pub const F2: u32 = 59;
    pub const F3: u32 = 60;
    pub const F4: u32 = 61;
    pub const F5: u32 = 62;
    pub const RIGHT: u32 = 79;
    pub const LEFT: u32 = 80;
    pub const DOWN: u32 = 81;
    pub const UP: u32 = 82;
    pub const LCTRL: u32 = 224;
    pub const LSHIFT: u32 = 225;
    pub const LALT: u32 = 226;
    pub const LGUI: u32 = 227;
    pub const RCTRL: u32 = 228;
    pub const RSHIFT: u32 = 229;
    pub const RALT: u32 = 230;
    pub const RGUI: u32 = 231;
}

/// Modifier bitmask type.
pub type Mod = u16;

/// Modifier bits, with left and right variants in distinct positions and
/// combined both-side masks per modifier.
pub mod modkey {
    pub const NONE: u16 = 0x0000;
    pub const LSHIFT: u16 = 0x0001;
    pub const RSHIFT: u16 = 0x0002;
    pub const LCTRL: u16 = 0x0040;
    pub const RCTRL: u16 = 0x0080;
    pub const LALT: u16 = 0x0100;
    pub const RALT: u16 = 0x0200;
    pub const LGUI: u16 = 0x0400;
    pub const RGUI: u16 = 0x0800;

    pub const SHIFT: u16 = LSHIFT | RSHIFT;
    pub const CTRL: u16 = LCTRL | RCTRL;
    pub const ALT: u16 = LALT | RALT;
    pub const GUI: u16 = LGUI | RGUI;

    /// The modifiers the mapping table distinguishes.
    pub const HANDLED: u16 = SHIFT | CTRL | ALT | GUI;
}

/// Fold left/right modifier variants into their combined masks and drop
/// unhandled bits, so a mapping recorded with one side matches an event
/// reporting the other.
#[must_use]
pub fn fold_mod(mask: Mod) -> Mod {
    let mut folded = modkey::NONE;
    for pair in [modkey::SHIFT, modkey::CTRL, modkey::ALT, modkey::GUI] {
        if mask & pair != 0 {
            folded |= pair;
        }
    }
    folded
}

/// Whether the scancode is itself a modifier key.
#[must_use]
pub fn is_modifier_key(code: KeyCode) -> bool {
    (key::LCTRL..=key::RGUI).contains(&code)
}

/// Human-readable name of a key.
#[must_use]
pub fn key_name(code: KeyCode) -> String {
    let name = match code {
        key::A..=key::Z => {
            let letter = b'A' + (code - key::A) as u8;
            return (letter as char).to_string();
        }
        key::NUM1..=key::NUM9 => {
            let digit = b'1' + (code - key::NUM1) as u8;
            return (digit as char).to_string();
        }
        key::NUM0 => "0",
        key::RETURN => "Return",
        key::ESCAPE => "Escape",
        key::BACKSPACE => "Backspace",
        key::TAB => "Tab",
        key::SPACE => "Space",
        key::F1 => "F1",
        key::F2 => "F2",
        key::F3 => "F3",
        key::F4 => "F4",
        key::F5 => "F5",
        key::RIGHT => "Right",
        key::LEFT => "Left",
        key::DOWN => "Down",
        key::UP => "Up",
        key::LCTRL => "Left Ctrl",
        key::LSHIFT => "Left Shift",
        key::LALT => "Left Alt",
        key::LGUI => "Left Gui",
        key::RCTRL => "Right Ctrl",
        key::RSHIFT => "Right Shift",
        key::RALT => "Right Alt",
        key::RGUI => "Right Gui",
        other => return format!("Key#{other}"),
    };
    name.to_string()
}

/// Modifier prefix for a description, e.g. `"Ctrl+Shift+"`.
#[must_use]
pub fn mod_prefix(mask: Mod) -> String {
    let mut prefix = String::new();
    for (pair, name) in [
        (modkey::CTRL, "Ctrl"),
        (modkey::SHIFT, "Shift"),
        (modkey::ALT, "Alt"),
        (modkey::GUI, "Gui"),
    ] {
        if mask & pair != 0 {
            prefix.push_str(name);
            prefix.push('+');
        }
    }
    prefix
}
