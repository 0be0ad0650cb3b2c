//! Line-oriented CDC-ACM debug output.
//!
//! Human-readable monitor tracing for a serial terminal; not a binding
//! protocol. The link is best-effort: if no terminal attaches within
//! the bounded wait the device runs without it, and lines written
//! while nothing is listening are dropped.

use core::fmt::Write as _;

use embassy_time::{with_timeout, Duration};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use heapless::String;

use glyphkey::error::Error;

use super::hid_device::UsbDriver;

/// Longest debug line we format; anything over this is dropped whole.
const LINE_CAPACITY: usize = 120;

pub struct DebugLink {
    class: CdcAcmClass<'static, UsbDriver>,
}

impl DebugLink {
    pub fn new(class: CdcAcmClass<'static, UsbDriver>) -> Self {
        Self { class }
    }

    /// Wait for a terminal to attach, up to `timeout_ms`.
    pub async fn wait_connected(&mut self, timeout_ms: u64) -> Result<(), Error> {
        with_timeout(
            Duration::from_millis(timeout_ms),
            self.class.wait_connection(),
        )
        .await
        .map_err(|_| Error::Timeout)
    }

    /// Write one formatted line, CRLF-terminated.
    pub async fn line(&mut self, args: core::fmt::Arguments<'_>) {
        if !self.class.dtr() {
            return;
        }
        let mut buf: String<LINE_CAPACITY> = String::new();
        if write!(&mut buf, "{}", args).is_err() {
            return;
        }
        let _ = buf.push_str("\r\n");
        for chunk in buf.as_bytes().chunks(64) {
            if self.class.write_packet(chunk).await.is_err() {
                return;
            }
        }
    }
}
