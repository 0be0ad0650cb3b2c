//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and the output
//! text live here so they can be tuned in one place.

// Trigger sampling

/// Raw samples taken per `stable_read` burst.
pub const VOTE_SAMPLES: u8 = 5;

/// Gap between raw samples within one burst (microseconds).
pub const VOTE_SAMPLE_GAP_US: u64 = 200;

/// Consecutive confirming stable reads required before firing.
pub const DEBOUNCE_SAMPLES: u8 = 8;

/// Minimum time between confirming reads (ms). Paces debouncing
/// independent of loop speed.
pub const DEBOUNCE_INTERVAL_MS: u64 = 10;

/// Lockout after the trigger is released (ms). One actuation, one fire.
pub const TRIGGER_COOLDOWN_MS: u64 = 1000;

/// Monitor loop period (ms).
pub const POLL_PERIOD_MS: u64 = 2;

// Typing

/// How long a plain keystroke is held before release, and how long the
/// all-keys-up state is held after it (ms). Hosts merge transitions
/// faster than this.
pub const KEY_SETTLE_MS: u32 = 20;

/// Hold/settle time around compose and alt-code chords (ms). Input
/// methods need slightly longer to register these than plain taps.
pub const CHORD_SETTLE_MS: u32 = 30;

/// Text typed on each trigger: `( ͡° ͜ʖ ͡°)`.
/// Combining marks written as escapes so the codepoint order is visible.
pub const OUTPUT_TEXT: &str = "( \u{0361}\u{00b0} \u{035c}\u{0296} \u{0361}\u{00b0})";

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0007;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "glyphkey";
pub const USB_PRODUCT: &str = "Unicode Trigger Keyboard";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

// Debug link

/// Expose a CDC-ACM serial interface carrying human-readable state
/// transition lines alongside the keyboard endpoint.
pub const DEBUG_LINK_ENABLED: bool = true;

/// How long to wait for a terminal to attach to the debug link before
/// monitoring starts without it (ms).
pub const DEBUG_LINK_WAIT_MS: u64 = 5000;

// GPIO pin assignments (Raspberry Pi Pico defaults)
//
// These are logical names; actual `embassy_rp::peripherals::PIN_*`
// types are selected in `main.rs`.  Adjust for your custom PCB.
//
//   Ground reference  → GPIO 4 (driven low)
//   Linux trigger     → GPIO 5 (short to GPIO 4 to fire)
//   Windows trigger   → GPIO 6 (short to GPIO 4 to fire)
//   Status LED        → GPIO 25 (Pico onboard LED)

// Status LED patterns

/// Blinks once USB enumeration completes.
pub const READY_BLINKS: u8 = 3;
pub const READY_BLINK_MS: u64 = 100;

/// One long blink when the Linux channel fires.
pub const LINUX_BLINKS: u8 = 1;
pub const LINUX_BLINK_MS: u64 = 100;

/// Two short blinks when the Windows channel fires.
pub const WINDOWS_BLINKS: u8 = 2;
pub const WINDOWS_BLINK_MS: u64 = 50;
