//! [`ReportTransport`] implementation over the embassy-usb HID writer.

use defmt::{trace, warn};
use embassy_time::Timer;
use embassy_usb::class::hid::HidWriter;

use glyphkey::error::Error;
use glyphkey::hid::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
use glyphkey::sink::ReportTransport;

use super::hid_device::{self, UsbDriver};

/// The real USB transport behind the typing engine.
pub struct UsbTransport {
    writer: HidWriter<'static, UsbDriver, 8>,
}

impl UsbTransport {
    pub fn new(writer: HidWriter<'static, UsbDriver, 8>) -> Self {
        Self { writer }
    }
}

impl ReportTransport for UsbTransport {
    /// Readiness maps to bus configuration; endpoint pacing within a
    /// configured session is absorbed by `write` below.
    fn report_ready(&self) -> bool {
        hid_device::is_mounted()
    }

    async fn submit(&mut self, report: KeyboardReport) -> Result<(), Error> {
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        let n = report.serialize(&mut buf);
        trace!(
            "report: mod={=u8:x} key={=u8:x}",
            report.modifier,
            report.keycodes[0]
        );
        self.writer.write(&buf[..n]).await.map_err(|_| {
            warn!("USB keyboard write failed");
            Error::Usb
        })
    }

    async fn settle(&mut self, ms: u32) {
        // The USB device runner is a separate task; this await is what
        // keeps it serviced during long scripts.
        Timer::after_millis(u64::from(ms)).await;
    }
}
