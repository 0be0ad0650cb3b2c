//! Trigger channel debouncing.
//!
//! Turns noisy, bouncy contact readings into a single clean fire event
//! per physical actuation. Two layers:
//!
//! 1. Majority voting over a burst of raw samples ([`resolve_reading`])
//!    rejects single-sample electrical noise.
//! 2. A four-state machine ([`TriggerMonitor`]) requires
//!    `debounce_samples` consecutive confirming reads, waits for
//!    release, then enforces a cooldown before re-arming.
//!
//! Everything here is pure: sampling hardware lives in the firmware's
//! board module, which feeds readings and a monotonic millisecond clock
//! into [`TriggerMonitor::tick`].

use crate::config;

/// Which trigger channel is (or was) active. The channel also selects
/// the Unicode entry recipe used for the typed output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerMode {
    /// Contact wired for hosts using Ctrl+Shift+U compose entry.
    Linux,
    /// Contact wired for hosts using Alt+X hex conversion.
    Windows,
}

/// Debounce machine state. Exactly one is active at any instant;
/// transitions are total functions of (state, reading, elapsed time).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerState {
    /// Nothing pressed.
    Idle,
    /// A channel went active; counting confirming reads.
    Debouncing,
    /// Fired; waiting for the channel to be released.
    Triggered,
    /// Released; re-trigger lockout running.
    Cooldown,
}

/// Timing knobs, grouped so hardware variants (single or dual channel,
/// debug builds with relaxed timing) share one machine.
#[derive(Clone, Copy, Debug)]
pub struct TriggerConfig {
    /// Consecutive confirming stable reads required to fire.
    pub debounce_samples: u8,
    /// Minimum spacing between confirming reads (ms).
    pub debounce_interval_ms: u64,
    /// Lockout after release (ms).
    pub cooldown_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            debounce_samples: config::DEBOUNCE_SAMPLES,
            debounce_interval_ms: config::DEBOUNCE_INTERVAL_MS,
            cooldown_ms: config::TRIGGER_COOLDOWN_MS,
        }
    }
}

/// Strict majority over a sample burst; a tie counts as inactive.
pub fn majority(active: u8, total: u8) -> bool {
    u16::from(active) * 2 > u16::from(total)
}

/// Resolve per-channel majority counts into a single reading.
///
/// The first channel wins when both clear the bar; the contacts are
/// mutually exclusive in the intended wiring, so this only matters for
/// miswired or shorted harnesses.
pub fn resolve_reading(linux_count: u8, windows_count: u8, total: u8) -> Option<TriggerMode> {
    if majority(linux_count, total) {
        return Some(TriggerMode::Linux);
    }
    if majority(windows_count, total) {
        return Some(TriggerMode::Windows);
    }
    None
}

/// Edge-triggered debounce machine. Owns all mutable trigger state;
/// ticked once per monitor loop iteration.
pub struct TriggerMonitor {
    state: TriggerState,
    state_start_ms: u64,
    debounce_count: u8,
    active: Option<TriggerMode>,
    cfg: TriggerConfig,
}

impl TriggerMonitor {
    pub fn new(cfg: TriggerConfig) -> Self {
        Self {
            state: TriggerState::Idle,
            state_start_ms: 0,
            debounce_count: 0,
            active: None,
            cfg,
        }
    }

    /// Current machine state.
    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Channel being debounced or held, if any.
    pub fn active_channel(&self) -> Option<TriggerMode> {
        self.active
    }

    /// Advance the machine one step.
    ///
    /// `now_ms` is a monotonic millisecond clock; `reading` is the
    /// majority-voted channel level from `stable_read`. Returns
    /// `Some(mode)` exactly once per confirmed actuation.
    pub fn tick(&mut self, now_ms: u64, reading: Option<TriggerMode>) -> Option<TriggerMode> {
        match self.state {
            TriggerState::Idle => {
                if reading.is_some() {
                    self.state = TriggerState::Debouncing;
                    self.state_start_ms = now_ms;
                    self.debounce_count = 1;
                    self.active = reading;
                }
                None
            }

            TriggerState::Debouncing => {
                // Pace confirming reads independent of loop speed.
                if now_ms - self.state_start_ms < self.cfg.debounce_interval_ms {
                    return None;
                }
                if reading == self.active {
                    self.debounce_count += 1;
                    self.state_start_ms = now_ms;
                    if self.debounce_count >= self.cfg.debounce_samples {
                        self.state = TriggerState::Triggered;
                        return self.active;
                    }
                    None
                } else {
                    // Released or switched channels: treat as noise.
                    self.state = TriggerState::Idle;
                    self.debounce_count = 0;
                    self.active = None;
                    None
                }
            }

            TriggerState::Triggered => {
                if reading.is_none() {
                    self.state = TriggerState::Cooldown;
                    self.state_start_ms = now_ms;
                }
                None
            }

            TriggerState::Cooldown => {
                if now_ms - self.state_start_ms >= self.cfg.cooldown_ms {
                    self.state = TriggerState::Idle;
                    self.active = None;
                }
                None
            }
        }
    }
}
