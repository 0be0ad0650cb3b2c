//! Unicode codepoint entry through an ASCII-only keyboard protocol.
//!
//! Neither recipe is a USB/HID primitive - both are host input-method
//! conventions layered on ordinary keystrokes, so they are best-effort
//! and depend on what the host has enabled:
//!
//! - **ComposeInput** (Linux, IBus-style): Ctrl+Shift+U chord, the four
//!   lowercase zero-padded hex digits of the codepoint, then Space to
//!   commit.
//! - **AltCode** (Windows, Word/WordPad): the four hex digits first,
//!   then Alt+X to convert the preceding text.
//!
//! Four hex digits cover the Basic Multilingual Plane; codepoints above
//! U+FFFF produce an empty sequence.

use super::codes::{self, modifier};
use super::Keystroke;

/// Which keystroke recipe converts a non-ASCII codepoint into
/// keystrokes on the target host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InjectionMethod {
    /// No escape recipe: only directly mapped characters are typed.
    Direct,
    /// Linux Ctrl+Shift+U hex entry.
    ComposeInput,
    /// Windows Alt+X hex conversion.
    AltCode,
}

/// Steps counted from the end so both recipes share one terminator.
const DONE: u8 = u8::MAX;

/// Lazy keystroke sequence entering one codepoint.
///
/// Finite and restartable: each [`inject`] call yields an independent
/// iterator with no shared state.
#[derive(Clone, Debug)]
pub struct UnicodeKeystrokes {
    method: InjectionMethod,
    codepoint: u16,
    step: u8,
}

/// Build the keystroke sequence for `codepoint` under `method`.
///
/// `Direct` and codepoints outside the BMP yield an empty sequence
/// (the character is skipped, the rest of the script still types).
pub fn inject(method: InjectionMethod, codepoint: u32) -> UnicodeKeystrokes {
    let (codepoint, step) = match (method, u16::try_from(codepoint)) {
        (InjectionMethod::Direct, _) | (_, Err(_)) => (0, DONE),
        (_, Ok(cp)) => (cp, 0),
    };
    UnicodeKeystrokes {
        method,
        codepoint,
        step,
    }
}

/// Keystroke for one lowercase hex digit ('a'-'f' unshifted letters).
fn hex_digit(codepoint: u16, index: u8) -> Keystroke {
    let nibble = ((codepoint >> (12 - 4 * u16::from(index))) & 0xF) as u8;
    let keycode = match nibble {
        0 => codes::KEY_0,
        1..=9 => codes::KEY_1 + (nibble - 1),
        _ => codes::KEY_A + (nibble - 10),
    };
    Keystroke::tap(0, keycode)
}

impl Iterator for UnicodeKeystrokes {
    type Item = Keystroke;

    fn next(&mut self) -> Option<Keystroke> {
        let step = self.step;
        if step == DONE {
            return None;
        }
        let ks = match self.method {
            InjectionMethod::Direct => return None,
            InjectionMethod::ComposeInput => match step {
                // Start compose, then the digits, then commit.
                0 => Keystroke::chord(modifier::LEFT_CTRL | modifier::LEFT_SHIFT, codes::KEY_U),
                1..=4 => hex_digit(self.codepoint, step - 1),
                5 => Keystroke::tap(0, codes::KEY_SPACE),
                _ => {
                    self.step = DONE;
                    return None;
                }
            },
            InjectionMethod::AltCode => match step {
                // Digits first; Alt+X converts what precedes the caret.
                0..=3 => hex_digit(self.codepoint, step),
                4 => Keystroke::chord(modifier::LEFT_ALT, codes::KEY_X),
                _ => {
                    self.step = DONE;
                    return None;
                }
            },
        };
        self.step = step + 1;
        Some(ks)
    }
}
