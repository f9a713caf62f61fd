//! Keyboard codes as reported by the simulation host.
//!
//! Single source of truth for key numbering: every adapter translates its
//! backend's key events into a [`KeyCode`] using the constants below, and
//! the controller only ever matches against these.
//!
//! The numbering follows the simulator's keyboard device: printable keys
//! report their uppercase ASCII value, special keys live above 255, and
//! modifiers are OR-ed in as high bits.  A key pressed with a modifier is
//! therefore a *different* code from the bare key.

use core::fmt;

// ---------------------------------------------------------------------------
// Special keys
// ---------------------------------------------------------------------------

pub const END: i32 = 312;
pub const HOME: i32 = 313;
pub const LEFT: i32 = 314;
pub const UP: i32 = 315;
pub const RIGHT: i32 = 316;
pub const DOWN: i32 = 317;
pub const PAGE_UP: i32 = 366;
pub const PAGE_DOWN: i32 = 367;

// ---------------------------------------------------------------------------
// Numeric keypad
// ---------------------------------------------------------------------------

pub const NUMPAD_HOME: i32 = 375;
pub const NUMPAD_LEFT: i32 = 376;
pub const NUMPAD_UP: i32 = 377;
pub const NUMPAD_RIGHT: i32 = 378;
pub const NUMPAD_DOWN: i32 = 379;
pub const NUMPAD_END: i32 = 382;

// ---------------------------------------------------------------------------
// Modifier bits
// ---------------------------------------------------------------------------

pub const SHIFT: i32 = 1 << 16;
pub const CONTROL: i32 = 1 << 17;
pub const ALT: i32 = 1 << 18;
/// Mask selecting the key part of a code (modifiers stripped).
pub const KEY_MASK: i32 = 0xffff;

/// One key code polled from the keyboard device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(i32);

impl KeyCode {
    pub const PAGE_UP: Self = Self(PAGE_UP);
    pub const PAGE_DOWN: Self = Self(PAGE_DOWN);
    pub const STOP: Self = Self(b'S' as i32);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Code for a printable ASCII character.  Letters fold to uppercase,
    /// matching what the host reports regardless of Caps Lock.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii() && !c.is_ascii_control() {
            Some(Self(c.to_ascii_uppercase() as i32))
        } else {
            None
        }
    }

    /// Add modifier bits (`SHIFT`, `CONTROL`, `ALT`).
    pub const fn with_modifiers(self, mods: i32) -> Self {
        Self(self.0 | (mods & !KEY_MASK))
    }

    /// Key part of the code with modifiers stripped.
    pub const fn key(self) -> i32 {
        self.0 & KEY_MASK
    }

    /// Modifier bits carried by the code.
    pub const fn modifiers(self) -> i32 {
        self.0 & !KEY_MASK
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mods = self.modifiers();
        if mods & CONTROL != 0 {
            f.write_str("Ctrl+")?;
        }
        if mods & ALT != 0 {
            f.write_str("Alt+")?;
        }
        if mods & SHIFT != 0 {
            f.write_str("Shift+")?;
        }

        let name = match self.key() {
            END => "End",
            HOME => "Home",
            LEFT => "Left",
            UP => "Up",
            RIGHT => "Right",
            DOWN => "Down",
            PAGE_UP => "PageUp",
            PAGE_DOWN => "PageDown",
            NUMPAD_HOME => "NumpadHome",
            NUMPAD_LEFT => "NumpadLeft",
            NUMPAD_UP => "NumpadUp",
            NUMPAD_RIGHT => "NumpadRight",
            NUMPAD_DOWN => "NumpadDown",
            NUMPAD_END => "NumpadEnd",
            k @ 0x21..=0x7e => return write!(f, "'{}'", k as u8 as char),
            k => return write!(f, "#{k}"),
        };
        f.write_str(name)
    }
}
