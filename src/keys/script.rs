//! Output script flattening: a Unicode string to an ordered keystroke
//! stream.
//!
//! ASCII characters translate through the symbol table; everything
//! else goes through the configured Unicode entry recipe. Characters
//! neither can express are skipped and the rest of the script still
//! types.

use super::encode::encode;
use super::unicode::{inject, InjectionMethod, UnicodeKeystrokes};
use super::Keystroke;
use core::str::Chars;

/// Iterator yielding every keystroke needed to type a script.
///
/// Created per fire event and discarded after emission; holds no state
/// beyond its position in the text.
pub struct ScriptKeystrokes<'a> {
    chars: Chars<'a>,
    method: InjectionMethod,
    pending: Option<UnicodeKeystrokes>,
}

/// Flatten `text` into keystrokes under `method`.
pub fn keystrokes(text: &str, method: InjectionMethod) -> ScriptKeystrokes<'_> {
    ScriptKeystrokes {
        chars: text.chars(),
        method,
        pending: None,
    }
}

impl Iterator for ScriptKeystrokes<'_> {
    type Item = Keystroke;

    fn next(&mut self) -> Option<Keystroke> {
        loop {
            if let Some(seq) = &mut self.pending {
                if let Some(ks) = seq.next() {
                    return Some(ks);
                }
                self.pending = None;
            }

            let c = self.chars.next()?;
            if c.is_ascii() {
                if let Some(ks) = encode(c) {
                    return Some(ks);
                }
                // Unmapped ASCII is skipped, not escaped.
            } else {
                self.pending = Some(inject(self.method, c as u32));
            }
        }
    }
}
