//! Printable-ASCII to keystroke translation.
//!
//! The mapping mirrors a physical US QWERTY layout's shift behavior -
//! the host decodes our scan codes with its own layout, so correctness
//! is defined relative to that assumption ('(' really is Shift+9).

use super::codes::{self, modifier};
use super::Keystroke;

/// Map a printable ASCII character to its keystroke on a US layout.
///
/// Covers letters (Shift for uppercase), digits, and the fixed symbol
/// set the output scripts need. Returns `None` for anything else; the
/// typing engine skips those characters.
pub fn encode(c: char) -> Option<Keystroke> {
    let (modifier, keycode) = match c {
        'a'..='z' => (0, codes::KEY_A + (c as u8 - b'a')),
        'A'..='Z' => (modifier::LEFT_SHIFT, codes::KEY_A + (c as u8 - b'A')),
        '1'..='9' => (0, codes::KEY_1 + (c as u8 - b'1')),
        '0' => (0, codes::KEY_0),
        ' ' => (0, codes::KEY_SPACE),
        '(' => (modifier::LEFT_SHIFT, codes::KEY_9),
        ')' => (modifier::LEFT_SHIFT, codes::KEY_0),
        '_' => (modifier::LEFT_SHIFT, codes::KEY_MINUS),
        '^' => (modifier::LEFT_SHIFT, codes::KEY_6),
        _ => return None,
    };
    Some(Keystroke::tap(modifier, keycode))
}
