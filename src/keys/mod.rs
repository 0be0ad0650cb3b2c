//! Keystroke model: characters and Unicode codepoints down to HID
//! (modifier, keycode) pairs.

pub mod codes;
pub mod encode;
pub mod script;
pub mod unicode;

use crate::config;

/// One key tap: a modifier chord plus a base key, held for `hold_ms`
/// before release (and settled for the same time after).
///
/// Immutable value, produced fresh per character or recipe step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keystroke {
    /// Modifier bitfield (see [`codes::modifier`]).
    pub modifier: u8,
    /// HID usage id on the Keyboard/Keypad page.
    pub keycode: u8,
    /// Hold/settle duration in milliseconds.
    pub hold_ms: u32,
}

impl Keystroke {
    /// Plain keystroke with the standard settle time.
    pub const fn tap(modifier: u8, keycode: u8) -> Self {
        Self {
            modifier,
            keycode,
            hold_ms: config::KEY_SETTLE_MS,
        }
    }

    /// Input-method chord; held longer so the host registers it.
    pub const fn chord(modifier: u8, keycode: u8) -> Self {
        Self {
            modifier,
            keycode,
            hold_ms: config::CHORD_SETTLE_MS,
        }
    }
}
