//! Keyboard report emission with settle timing.
//!
//! [`KeyboardSink`] turns keystrokes into press/release report pairs
//! with a settle pause after every transition. Host input methods
//! sample discrete chord transitions; reports that change faster than
//! the settle time get merged or dropped on the host, so the pauses are
//! part of the contract, not tuning.
//!
//! Every pause runs through [`ReportTransport::settle`], which must
//! keep the underlying USB stack serviced - a long script must never
//! starve transport bookkeeping. In the firmware that falls out of the
//! executor: the USB device runner is its own task and every `await`
//! here yields to it.

use crate::error::Error;
use crate::hid::keyboard::KeyboardReport;
use crate::keys::script;
use crate::keys::unicode::InjectionMethod;
use crate::keys::Keystroke;

/// Minimal interface the typing engine needs from the USB transport.
#[allow(async_fn_in_trait)]
pub trait ReportTransport {
    /// Whether a report may be submitted right now.
    fn report_ready(&self) -> bool;

    /// Transmit one keyboard report.
    async fn submit(&mut self, report: KeyboardReport) -> Result<(), Error>;

    /// Pause for `ms` while keeping the transport serviced.
    async fn settle(&mut self, ms: u32);
}

/// Emits timed keyboard reports through a [`ReportTransport`].
pub struct KeyboardSink<T> {
    transport: T,
}

impl<T: ReportTransport> KeyboardSink<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying transport (used by tests to inspect it).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Press a chord of up to 6 keys and hold it for `hold_ms`.
    ///
    /// When the transport is not ready the press is dropped - not
    /// queued, not retried - and `Ok(false)` is returned. A trigger
    /// arriving before the host finishes enumeration simply produces
    /// no output.
    pub async fn press(&mut self, modifier: u8, keys: &[u8], hold_ms: u32) -> Result<bool, Error> {
        if !self.transport.report_ready() {
            return Ok(false);
        }
        self.transport
            .submit(KeyboardReport::pressed(modifier, keys))
            .await?;
        self.transport.settle(hold_ms).await;
        Ok(true)
    }

    /// Release all keys and settle for `hold_ms`.
    pub async fn release(&mut self, hold_ms: u32) -> Result<(), Error> {
        self.transport.submit(KeyboardReport::released()).await?;
        self.transport.settle(hold_ms).await;
        Ok(())
    }

    /// Full tap: press, settle, release, settle.
    ///
    /// Readiness is checked once, at press time. A tap whose press was
    /// dropped emits no release either; a press that went out always
    /// gets its matching release, so the host never sees a stuck chord.
    pub async fn tap(&mut self, ks: Keystroke) -> Result<(), Error> {
        if self.press(ks.modifier, &[ks.keycode], ks.hold_ms).await? {
            self.release(ks.hold_ms).await?;
        }
        Ok(())
    }

    /// Type a whole script with the given Unicode entry recipe.
    ///
    /// Keystrokes go out strictly in script order, each tap fully
    /// completed before the next begins - the device report can only
    /// represent one chord at a time, so nothing may overlap.
    pub async fn type_script(&mut self, text: &str, method: InjectionMethod) -> Result<(), Error> {
        for ks in script::keystrokes(text, method) {
            self.tap(ks).await?;
        }
        Ok(())
    }
}
