//! Board I/O: trigger contacts and the status LED.
//!
//! The trigger harness is three pins: a ground-reference output held
//! low and two active-low inputs with internal pull-ups. Shorting an
//! input to the reference pin asserts that channel.

use embassy_rp::gpio::{Input, Output};
use embassy_time::Timer;

use glyphkey::config;
use glyphkey::trigger::{self, TriggerMode};

pub struct TriggerPins<'d> {
    _ground: Output<'d>,
    linux: Input<'d>,
    windows: Input<'d>,
}

impl<'d> TriggerPins<'d> {
    /// `ground` must be driven low; it is held here so it stays
    /// configured for the life of the monitor.
    pub fn new(ground: Output<'d>, linux: Input<'d>, windows: Input<'d>) -> Self {
        Self {
            _ground: ground,
            linux,
            windows,
        }
    }

    /// Majority-voted reading of both channels.
    ///
    /// Takes a short burst of raw samples per channel and feeds the
    /// counts to the vote, so a single bounced sample cannot flip the
    /// reported level.
    pub async fn stable_read(&mut self) -> Option<TriggerMode> {
        let mut linux = 0u8;
        let mut windows = 0u8;
        for _ in 0..config::VOTE_SAMPLES {
            if self.linux.is_low() {
                linux += 1;
            }
            if self.windows.is_low() {
                windows += 1;
            }
            Timer::after_micros(config::VOTE_SAMPLE_GAP_US).await;
        }
        trigger::resolve_reading(linux, windows, config::VOTE_SAMPLES)
    }
}

/// Onboard LED used as the only user-visible status channel.
pub struct StatusLed<'d> {
    pin: Output<'d>,
}

impl<'d> StatusLed<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }

    pub fn on(&mut self) {
        self.pin.set_high();
    }

    pub fn off(&mut self) {
        self.pin.set_low();
    }

    /// Blink `times` with `ms` on/off periods, ending dark.
    pub async fn blink(&mut self, times: u8, ms: u64) {
        for i in 0..times {
            self.pin.set_high();
            Timer::after_millis(ms).await;
            self.pin.set_low();
            if i + 1 < times {
                Timer::after_millis(ms).await;
            }
        }
    }
}
