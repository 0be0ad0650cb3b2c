//! glyphkey firmware for the Raspberry Pi Pico (RP2040).
//!
//! Enumerates as a USB keyboard and, on a debounced GPIO trigger,
//! types the configured Unicode text using the entry recipe matching
//! the channel that fired. All decision logic lives in the library
//! crate; this binary wires it to the board and the USB stack.

#![no_std]
#![no_main]

mod board;
mod usb;

use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Instant, Timer};
use panic_probe as _;

use glyphkey::config;
use glyphkey::keys::unicode::InjectionMethod;
use glyphkey::sink::KeyboardSink;
use glyphkey::trigger::{TriggerMode, TriggerMonitor};

use board::{StatusLed, TriggerPins};
use usb::hid_device::{self, UsbDriver};
use usb::transport::UsbTransport;

#[embassy_executor::task]
async fn usb_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("glyphkey starting");

    let mut pins = TriggerPins::new(
        Output::new(p.PIN_4, Level::Low),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
    );
    let mut led = StatusLed::new(Output::new(p.PIN_25, Level::Low));

    let parts = hid_device::init(p.USB);
    unwrap!(spawner.spawn(usb_task(parts.device)));

    // No monitoring (and no typing) until the host has enumerated us.
    hid_device::wait_mounted().await;
    info!("USB mounted");
    led.blink(config::READY_BLINKS, config::READY_BLINK_MS).await;

    let mut link = parts.debug_link;
    if let Some(link) = link.as_mut() {
        match link.wait_connected(config::DEBUG_LINK_WAIT_MS).await {
            Ok(()) => {
                link.line(format_args!(
                    "glyphkey ready; short GPIO 5 (Linux) or GPIO 6 (Windows) to GPIO 4"
                ))
                .await;
            }
            Err(_) => info!("debug link not connected, continuing without it"),
        }
    }

    let mut sink = KeyboardSink::new(UsbTransport::new(parts.keyboard));
    let mut monitor = TriggerMonitor::new(Default::default());
    let mut prev_state = monitor.state();

    loop {
        let reading = pins.stable_read().await;
        let fired = monitor.tick(Instant::now().as_millis(), reading);

        let state = monitor.state();
        if state != prev_state {
            info!("trigger state: {} -> {}", prev_state, state);
            if let Some(link) = link.as_mut() {
                link.line(format_args!("state {:?} -> {:?}", prev_state, state))
                    .await;
            }
            prev_state = state;
        }

        if let Some(mode) = fired {
            let method = match mode {
                TriggerMode::Linux => {
                    led.blink(config::LINUX_BLINKS, config::LINUX_BLINK_MS).await;
                    InjectionMethod::ComposeInput
                }
                TriggerMode::Windows => {
                    led.blink(config::WINDOWS_BLINKS, config::WINDOWS_BLINK_MS).await;
                    InjectionMethod::AltCode
                }
            };
            info!("fired: {}", mode);
            if let Some(link) = link.as_mut() {
                link.line(format_args!("fire {:?}: typing output", mode)).await;
            }

            // Typing blocks the monitor until the whole script is out;
            // a second actuation during emission is ignored by
            // construction.
            led.on();
            if let Err(e) = sink.type_script(config::OUTPUT_TEXT, method).await {
                warn!("typing aborted: {}", e);
            }
            led.off();
        }

        Timer::after_millis(config::POLL_PERIOD_MS).await;
    }
}
