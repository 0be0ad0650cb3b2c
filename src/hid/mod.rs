//! HID report types.

pub mod keyboard;

pub use keyboard::KeyboardReport;
