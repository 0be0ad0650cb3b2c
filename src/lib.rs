//! Host-testable core for glyphkey.
//!
//! Everything with decision logic lives here and compiles without the
//! embedded stack: the trigger debounce machine, the character and
//! Unicode keystroke encoders, the keyboard report type, and the typing
//! engine behind the [`sink::ReportTransport`] boundary.
//!
//! Usage: `cargo test` (runs entirely on the host).
//!
//! The firmware binary (`main.rs`, `#![no_std]` + `#![no_main]`, cargo
//! feature `embedded`) consumes this library and adds the RP2040 board
//! and USB modules.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod hid;
pub mod keys;
pub mod sink;
pub mod trigger;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::hid::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
    use crate::keys::codes::{self, modifier};
    use crate::keys::encode::encode;
    use crate::keys::script::keystrokes;
    use crate::keys::unicode::{inject, InjectionMethod};
    use crate::keys::Keystroke;
    use crate::trigger::{
        majority, resolve_reading, TriggerConfig, TriggerMode, TriggerMonitor, TriggerState,
    };
    use crate::config;

    // ════════════════════════════════════════════════════════════════════════
    // Key Encoder Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn encode_lowercase_letters() {
        let a = encode('a').unwrap();
        assert_eq!(a.modifier, 0);
        assert_eq!(a.keycode, codes::KEY_A);

        let z = encode('z').unwrap();
        assert_eq!(z.modifier, 0);
        assert_eq!(z.keycode, codes::KEY_A + 25);
    }

    #[test]
    fn encode_uppercase_needs_shift() {
        let big_a = encode('A').unwrap();
        assert_eq!(big_a.modifier, modifier::LEFT_SHIFT);
        assert_eq!(big_a.keycode, codes::KEY_A);

        let big_q = encode('Q').unwrap();
        assert_eq!(big_q.modifier, modifier::LEFT_SHIFT);
        assert_eq!(big_q.keycode, codes::KEY_A + 16);
    }

    #[test]
    fn encode_digits() {
        let one = encode('1').unwrap();
        assert_eq!((one.modifier, one.keycode), (0, codes::KEY_1));

        let nine = encode('9').unwrap();
        assert_eq!((nine.modifier, nine.keycode), (0, codes::KEY_9));

        // '0' sits after '9' in the usage table, not before '1'.
        let zero = encode('0').unwrap();
        assert_eq!((zero.modifier, zero.keycode), (0, codes::KEY_0));
    }

    #[test]
    fn encode_shifted_symbols_mirror_us_layout() {
        let open = encode('(').unwrap();
        assert_eq!(open.modifier, modifier::LEFT_SHIFT);
        assert_eq!(open.keycode, codes::KEY_9);

        let close = encode(')').unwrap();
        assert_eq!(close.modifier, modifier::LEFT_SHIFT);
        assert_eq!(close.keycode, codes::KEY_0);

        let underscore = encode('_').unwrap();
        assert_eq!(underscore.modifier, modifier::LEFT_SHIFT);
        assert_eq!(underscore.keycode, codes::KEY_MINUS);

        let caret = encode('^').unwrap();
        assert_eq!(caret.modifier, modifier::LEFT_SHIFT);
        assert_eq!(caret.keycode, codes::KEY_6);
    }

    #[test]
    fn encode_space_unshifted() {
        let sp = encode(' ').unwrap();
        assert_eq!((sp.modifier, sp.keycode), (0, codes::KEY_SPACE));
    }

    #[test]
    fn encode_uncovered_characters_have_no_mapping() {
        assert!(encode('@').is_none());
        assert!(encode('!').is_none());
        assert!(encode('\n').is_none());
        assert!(encode('\t').is_none());
    }

    #[test]
    fn keystroke_hold_times() {
        assert_eq!(Keystroke::tap(0, codes::KEY_A).hold_ms, config::KEY_SETTLE_MS);
        assert_eq!(
            Keystroke::chord(modifier::LEFT_ALT, codes::KEY_X).hold_ms,
            config::CHORD_SETTLE_MS
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // Unicode Injection Tests
    // ════════════════════════════════════════════════════════════════════════

    /// Collect (modifier, keycode) pairs from an injection sequence.
    fn pairs(method: InjectionMethod, cp: u32) -> Vec<(u8, u8)> {
        inject(method, cp).map(|k| (k.modifier, k.keycode)).collect()
    }

    #[test]
    fn compose_recipe_for_degree_sign() {
        // U+00B0: start chord, '0' '0' 'b' '0', Space to commit.
        assert_eq!(
            pairs(InjectionMethod::ComposeInput, 0x00B0),
            [
                (modifier::LEFT_CTRL | modifier::LEFT_SHIFT, codes::KEY_U),
                (0, codes::KEY_0),
                (0, codes::KEY_0),
                (0, codes::KEY_A + 1), // 'b', unshifted
                (0, codes::KEY_0),
                (0, codes::KEY_SPACE),
            ]
        );
    }

    #[test]
    fn compose_recipe_zero_pads_to_four_digits() {
        // U+0361 → "0361"
        assert_eq!(
            pairs(InjectionMethod::ComposeInput, 0x0361),
            [
                (modifier::LEFT_CTRL | modifier::LEFT_SHIFT, codes::KEY_U),
                (0, codes::KEY_0),
                (0, codes::KEY_3),
                (0, codes::KEY_6),
                (0, codes::KEY_1),
                (0, codes::KEY_SPACE),
            ]
        );
    }

    #[test]
    fn alt_code_recipe_digits_then_chord() {
        assert_eq!(
            pairs(InjectionMethod::AltCode, 0x00B0),
            [
                (0, codes::KEY_0),
                (0, codes::KEY_0),
                (0, codes::KEY_A + 1),
                (0, codes::KEY_0),
                (modifier::LEFT_ALT, codes::KEY_X),
            ]
        );
    }

    #[test]
    fn chord_steps_hold_longer_than_digits() {
        let seq: Vec<Keystroke> = inject(InjectionMethod::ComposeInput, 0x00B0).collect();
        assert_eq!(seq[0].hold_ms, config::CHORD_SETTLE_MS);
        assert!(seq[1..].iter().all(|k| k.hold_ms == config::KEY_SETTLE_MS));

        let seq: Vec<Keystroke> = inject(InjectionMethod::AltCode, 0x00B0).collect();
        assert_eq!(seq.last().unwrap().hold_ms, config::CHORD_SETTLE_MS);
    }

    #[test]
    fn injection_outside_bmp_is_empty() {
        assert!(pairs(InjectionMethod::ComposeInput, 0x1F600).is_empty());
        assert!(pairs(InjectionMethod::AltCode, 0x10000).is_empty());
    }

    #[test]
    fn direct_method_injects_nothing() {
        assert!(pairs(InjectionMethod::Direct, 0x00B0).is_empty());
    }

    #[test]
    fn injection_sequences_are_restartable() {
        let seq = inject(InjectionMethod::ComposeInput, 0x0296);
        let first: Vec<Keystroke> = seq.clone().collect();
        let second: Vec<Keystroke> = seq.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Script Flattening Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn script_mixes_ascii_and_injection() {
        // '(' + 6-step compose sequence + ')'
        let ks: Vec<Keystroke> = keystrokes("(\u{00b0})", InjectionMethod::ComposeInput).collect();
        assert_eq!(ks.len(), 8);
        assert_eq!((ks[0].modifier, ks[0].keycode), (modifier::LEFT_SHIFT, codes::KEY_9));
        assert_eq!(
            (ks[1].modifier, ks[1].keycode),
            (modifier::LEFT_CTRL | modifier::LEFT_SHIFT, codes::KEY_U)
        );
        assert_eq!((ks[6].modifier, ks[6].keycode), (0, codes::KEY_SPACE));
        assert_eq!((ks[7].modifier, ks[7].keycode), (modifier::LEFT_SHIFT, codes::KEY_0));
    }

    #[test]
    fn script_skips_unmapped_ascii() {
        let ks: Vec<Keystroke> = keystrokes("a@b", InjectionMethod::ComposeInput).collect();
        assert_eq!(ks.len(), 2);
        assert_eq!(ks[0].keycode, codes::KEY_A);
        assert_eq!(ks[1].keycode, codes::KEY_A + 1);
    }

    #[test]
    fn script_direct_method_drops_non_ascii() {
        let ks: Vec<Keystroke> = keystrokes("(\u{00b0})", InjectionMethod::Direct).collect();
        assert_eq!(ks.len(), 2);
    }

    #[test]
    fn output_text_flattens_completely() {
        // 5 mapped ASCII chars + 6 codepoints × 6 compose steps.
        let compose: Vec<Keystroke> =
            keystrokes(config::OUTPUT_TEXT, InjectionMethod::ComposeInput).collect();
        assert_eq!(compose.len(), 5 + 6 * 6);

        // Alt-code sequences are one step shorter (no commit key).
        let alt: Vec<Keystroke> =
            keystrokes(config::OUTPUT_TEXT, InjectionMethod::AltCode).collect();
        assert_eq!(alt.len(), 5 + 6 * 5);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Keyboard Report Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn report_pressed_fills_first_slots() {
        let report = KeyboardReport::pressed(modifier::LEFT_SHIFT, &[codes::KEY_9]);
        assert_eq!(report.modifier, 0x02);
        assert_eq!(report.keycodes, [codes::KEY_9, 0, 0, 0, 0, 0]);
        assert!(!report.is_empty());
    }

    #[test]
    fn report_pressed_ignores_keys_past_six() {
        let report = KeyboardReport::pressed(0, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(report.keycodes, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn report_released_is_empty() {
        let report = KeyboardReport::released();
        assert!(report.is_empty());
        assert_eq!(report.modifier, 0);
        assert_eq!(report.keycodes, [0; 6]);
    }

    #[test]
    fn report_modifier_only_is_not_empty() {
        let report = KeyboardReport::pressed(modifier::LEFT_CTRL, &[]);
        assert!(!report.is_empty());
    }

    #[test]
    fn report_serialize_layout() {
        let report = KeyboardReport::pressed(0x03, &[codes::KEY_U]);
        let mut buf = [0u8; 8];
        let written = report.serialize(&mut buf);
        assert_eq!(written, KEYBOARD_REPORT_SIZE);
        assert_eq!(buf, [0x03, 0x00, codes::KEY_U, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn report_serialize_buffer_too_small() {
        let mut buf = [0u8; 4];
        assert_eq!(KeyboardReport::released().serialize(&mut buf), 0);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Majority Vote Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn majority_requires_strict_majority() {
        assert!(majority(3, 5));
        assert!(majority(5, 5));
        assert!(!majority(2, 5));
        assert!(!majority(0, 5));
    }

    #[test]
    fn majority_tie_counts_as_inactive() {
        assert!(!majority(2, 4));
        assert!(!majority(3, 6));
    }

    #[test]
    fn resolve_reading_picks_winning_channel() {
        assert_eq!(resolve_reading(4, 0, 5), Some(TriggerMode::Linux));
        assert_eq!(resolve_reading(0, 3, 5), Some(TriggerMode::Windows));
        assert_eq!(resolve_reading(2, 2, 5), None);
        assert_eq!(resolve_reading(0, 0, 5), None);
    }

    #[test]
    fn resolve_reading_first_channel_wins_when_both_active() {
        assert_eq!(resolve_reading(5, 5, 5), Some(TriggerMode::Linux));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Trigger State Machine Tests
    // ════════════════════════════════════════════════════════════════════════

    fn test_config() -> TriggerConfig {
        TriggerConfig {
            debounce_samples: 8,
            debounce_interval_ms: 10,
            cooldown_ms: 1000,
        }
    }

    /// Hold `reading` steady through paced ticks until the monitor
    /// fires or `max_ticks` elapse. Returns (fire, now_ms).
    fn hold_until_fire(
        monitor: &mut TriggerMonitor,
        mut now: u64,
        reading: Option<TriggerMode>,
        max_ticks: usize,
    ) -> (Option<TriggerMode>, u64) {
        for _ in 0..max_ticks {
            now += 10;
            if let Some(mode) = monitor.tick(now, reading) {
                return (Some(mode), now);
            }
        }
        (None, now)
    }

    #[test]
    fn monitor_starts_idle() {
        let monitor = TriggerMonitor::new(test_config());
        assert_eq!(monitor.state(), TriggerState::Idle);
        assert_eq!(monitor.active_channel(), None);
    }

    #[test]
    fn fires_after_required_consecutive_confirms() {
        let mut monitor = TriggerMonitor::new(test_config());

        // First active read arms the machine (counts as confirm #1).
        assert_eq!(monitor.tick(0, Some(TriggerMode::Linux)), None);
        assert_eq!(monitor.state(), TriggerState::Debouncing);
        assert_eq!(monitor.active_channel(), Some(TriggerMode::Linux));

        // Confirms 2..=7: still debouncing.
        let mut now = 0;
        for _ in 0..6 {
            now += 10;
            assert_eq!(monitor.tick(now, Some(TriggerMode::Linux)), None);
            assert_eq!(monitor.state(), TriggerState::Debouncing);
        }

        // Confirm #8 fires, tagged with the channel.
        assert_eq!(monitor.tick(now + 10, Some(TriggerMode::Linux)), Some(TriggerMode::Linux));
        assert_eq!(monitor.state(), TriggerState::Triggered);
    }

    #[test]
    fn confirms_are_paced_by_debounce_interval() {
        let mut monitor = TriggerMonitor::new(test_config());
        monitor.tick(0, Some(TriggerMode::Linux));

        // A fast loop hammering the monitor between intervals must not
        // accumulate confirms.
        for now in 1..10 {
            assert_eq!(monitor.tick(now, Some(TriggerMode::Linux)), None);
        }
        // Still needs 7 paced confirms after arming.
        let (fire, _) = hold_until_fire(&mut monitor, 0, Some(TriggerMode::Linux), 6);
        assert_eq!(fire, None);
        assert_eq!(monitor.tick(70, Some(TriggerMode::Linux)), Some(TriggerMode::Linux));
    }

    #[test]
    fn single_noisy_read_resets_to_idle_without_firing() {
        let mut monitor = TriggerMonitor::new(test_config());
        monitor.tick(0, Some(TriggerMode::Linux));
        monitor.tick(10, Some(TriggerMode::Linux));
        monitor.tick(20, Some(TriggerMode::Linux));

        // Noise: channel reads inactive mid-debounce.
        assert_eq!(monitor.tick(30, None), None);
        assert_eq!(monitor.state(), TriggerState::Idle);
        assert_eq!(monitor.active_channel(), None);

        // The full confirm count is required again from scratch.
        assert_eq!(monitor.tick(40, Some(TriggerMode::Linux)), None);
        let (fire, _) = hold_until_fire(&mut monitor, 40, Some(TriggerMode::Linux), 6);
        assert_eq!(fire, None);
        assert_eq!(monitor.tick(110, Some(TriggerMode::Linux)), Some(TriggerMode::Linux));
    }

    #[test]
    fn channel_switch_mid_debounce_resets() {
        let mut monitor = TriggerMonitor::new(test_config());
        monitor.tick(0, Some(TriggerMode::Linux));
        assert_eq!(monitor.tick(10, Some(TriggerMode::Windows)), None);
        assert_eq!(monitor.state(), TriggerState::Idle);
    }

    #[test]
    fn holding_produces_exactly_one_fire() {
        let mut monitor = TriggerMonitor::new(test_config());
        monitor.tick(0, Some(TriggerMode::Windows));
        let (fire, now) = hold_until_fire(&mut monitor, 0, Some(TriggerMode::Windows), 20);
        assert_eq!(fire, Some(TriggerMode::Windows));

        // Keep holding for a long time: no second fire.
        let (refire, _) = hold_until_fire(&mut monitor, now, Some(TriggerMode::Windows), 500);
        assert_eq!(refire, None);
        assert_eq!(monitor.state(), TriggerState::Triggered);
    }

    #[test]
    fn release_enters_cooldown_then_rearms() {
        let mut monitor = TriggerMonitor::new(test_config());
        monitor.tick(0, Some(TriggerMode::Linux));
        let (fire, now) = hold_until_fire(&mut monitor, 0, Some(TriggerMode::Linux), 20);
        assert!(fire.is_some());

        // Release → cooldown.
        assert_eq!(monitor.tick(now + 10, None), None);
        assert_eq!(monitor.state(), TriggerState::Cooldown);
        let released_at = now + 10;

        // A press during cooldown is ignored entirely.
        assert_eq!(monitor.tick(released_at + 500, Some(TriggerMode::Linux)), None);
        assert_eq!(monitor.state(), TriggerState::Cooldown);
        assert_eq!(monitor.tick(released_at + 999, None), None);
        assert_eq!(monitor.state(), TriggerState::Cooldown);

        // Cooldown elapses → idle, channel cleared, no permanent lockout.
        assert_eq!(monitor.tick(released_at + 1000, None), None);
        assert_eq!(monitor.state(), TriggerState::Idle);
        assert_eq!(monitor.active_channel(), None);

        // A fresh actuation fires again.
        let start = released_at + 1010;
        assert_eq!(monitor.tick(start, Some(TriggerMode::Linux)), None);
        let (fire, _) = hold_until_fire(&mut monitor, start, Some(TriggerMode::Linux), 20);
        assert_eq!(fire, Some(TriggerMode::Linux));
    }

    #[test]
    fn bounce_during_release_cannot_refire_within_cooldown() {
        let mut monitor = TriggerMonitor::new(test_config());
        monitor.tick(0, Some(TriggerMode::Linux));
        let (_, now) = hold_until_fire(&mut monitor, 0, Some(TriggerMode::Linux), 20);
        monitor.tick(now + 10, None);

        // Release bounce: rapid active/inactive flapping right after.
        let mut t = now + 20;
        for i in 0..50 {
            let reading = if i % 2 == 0 { Some(TriggerMode::Linux) } else { None };
            assert_eq!(monitor.tick(t, reading), None);
            t += 10;
        }
        assert_eq!(monitor.state(), TriggerState::Cooldown);
    }
}
