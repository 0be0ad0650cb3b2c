//! USB HID keyboard usage ids (Usage Page 0x07) and modifier bits.
//!
//! Only the usages this device can emit are named; letters and digits
//! are derived arithmetically from `KEY_A` / `KEY_1`.

/// Modifier byte bits, in report bit order.
pub mod modifier {
    pub const LEFT_CTRL: u8 = 0x01;
    pub const LEFT_SHIFT: u8 = 0x02;
    pub const LEFT_ALT: u8 = 0x04;
    pub const LEFT_GUI: u8 = 0x08;
    pub const RIGHT_CTRL: u8 = 0x10;
    pub const RIGHT_SHIFT: u8 = 0x20;
    pub const RIGHT_ALT: u8 = 0x40;
    pub const RIGHT_GUI: u8 = 0x80;
}

/// 'a' .. 'z' are `KEY_A + offset`.
pub const KEY_A: u8 = 0x04;
pub const KEY_U: u8 = 0x18;
pub const KEY_X: u8 = 0x1B;

/// '1' .. '9' are `KEY_1 + offset`; '0' is its own usage after '9'.
pub const KEY_1: u8 = 0x1E;
pub const KEY_2: u8 = 0x1F;
pub const KEY_3: u8 = 0x20;
pub const KEY_5: u8 = 0x22;
pub const KEY_6: u8 = 0x23;
pub const KEY_9: u8 = 0x26;
pub const KEY_0: u8 = 0x27;

pub const KEY_SPACE: u8 = 0x2C;
pub const KEY_MINUS: u8 = 0x2D;
