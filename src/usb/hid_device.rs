//! USB device build: HID keyboard endpoint plus the optional CDC
//! debug interface.
//!
//! Initialises the embassy USB stack on the RP2040 hardware USB
//! peripheral. Bus configuration state ("mounted") is tracked by a
//! device handler and exposed through [`is_mounted`]/[`wait_mounted`]
//! so monitoring and typing can gate on host enumeration.

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::info;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_rp::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::cdc_acm::{self, CdcAcmClass};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

use glyphkey::config;
use glyphkey::hid::keyboard::KEYBOARD_REPORT_DESCRIPTOR;

use super::debug_link::DebugLink;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<peripherals::USB>;
});

pub type UsbDriver = Driver<'static, peripherals::USB>;

static KB_STATE: StaticCell<State> = StaticCell::new();
static CDC_STATE: StaticCell<cdc_acm::State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static BUS_HANDLER: StaticCell<BusStateHandler> = StaticCell::new();

static MOUNTED: AtomicBool = AtomicBool::new(false);
static MOUNT_SIGNAL: Signal<CriticalSectionRawMutex, bool> = Signal::new();

struct BusStateHandler;

impl embassy_usb::Handler for BusStateHandler {
    fn configured(&mut self, configured: bool) {
        MOUNTED.store(configured, Ordering::Relaxed);
        MOUNT_SIGNAL.signal(configured);
    }
}

/// Whether the host has configured the device.
pub fn is_mounted() -> bool {
    MOUNTED.load(Ordering::Relaxed)
}

/// Wait until the host configures the device.
pub async fn wait_mounted() {
    if is_mounted() {
        return;
    }
    while !MOUNT_SIGNAL.wait().await {}
}

/// Build result: the USB device runner plus the endpoints.
pub struct UsbParts {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard: HidWriter<'static, UsbDriver, 8>,
    pub debug_link: Option<DebugLink>,
}

/// Initialise the USB stack and create the device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USB) -> UsbParts {
    let driver = Driver::new(usbd, Irqs);

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;
    if config::DEBUG_LINK_ENABLED {
        // CDC+HID composite needs IAD class codes at the device level.
        usb_config.composite_with_iads = true;
        usb_config.device_class = 0xEF;
        usb_config.device_sub_class = 0x02;
        usb_config.device_protocol = 0x01;
    }

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    builder.handler(BUS_HANDLER.init(BusStateHandler));

    let debug_link = if config::DEBUG_LINK_ENABLED {
        let state = CDC_STATE.init(cdc_acm::State::new());
        Some(DebugLink::new(CdcAcmClass::new(&mut builder, state, 64)))
    } else {
        None
    };

    let kb_state = KB_STATE.init(State::new());
    let kb_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard = HidWriter::new(&mut builder, kb_state, kb_config);

    let device = builder.build();

    info!(
        "USB keyboard initialised (debug link: {})",
        config::DEBUG_LINK_ENABLED
    );

    UsbParts {
        device,
        keyboard,
        debug_link,
    }
}

/// Run the USB device stack - must be spawned as a dedicated task.
///
/// Handles enumeration, suspend/resume, and endpoint servicing. Every
/// suspension point elsewhere in the firmware yields back to this
/// task, which is what keeps the transport alive during long typing
/// sequences.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}
