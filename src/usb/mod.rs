//! USB device: HID keyboard endpoint plus optional CDC debug link.

pub mod debug_link;
pub mod hid_device;
pub mod transport;
