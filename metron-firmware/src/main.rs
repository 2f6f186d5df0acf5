//! Metron - Dual-Channel Acquisition Controller Firmware
//!
//! Main firmware binary for RP2040-based sampling nodes. Bridges a
//! line-oriented host serial link to a DHT11 sensor, a pulse-counted
//! frequency input, an analog feedback converter, and a 2x16 panel.
//!
//! Named after the Greek "metron" meaning "measure" - which is all
//! this firmware does.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use metron_core::{LinkConfig, SamplingConfig};
use metron_drivers::{DacConfig, Dht11, Hd44780, Pcf8591};

use crate::board::OpenDrain;

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Metron firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let link = LinkConfig::default();
    let sampling = SamplingConfig::default();

    // Setup UART for host communication
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = link.baudrate;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for host communication");

    // DHT11 data line, open-drain with the internal pull-up
    let sensor = Dht11::new(OpenDrain::new(Flex::new(p.PIN_2)), Delay);

    // Frequency input, counted on falling edges
    let pulse_pin = Input::new(p.PIN_3, Pull::Up);

    // Feedback converter bus: push-pull clock, open-drain data
    let scl = Output::new(p.PIN_4, Level::High);
    let sda = OpenDrain::new(Flex::new(p.PIN_5));
    let dac = Pcf8591::new(scl, sda, Delay, DacConfig::default());

    // Character panel on the four-bit bus
    let display = Hd44780::new(
        Output::new(p.PIN_6, Level::Low),  // RS
        Output::new(p.PIN_7, Level::Low),  // EN
        Output::new(p.PIN_8, Level::Low),  // D4
        Output::new(p.PIN_9, Level::Low),  // D5
        Output::new(p.PIN_10, Level::Low), // D6
        Output::new(p.PIN_11, Level::Low), // D7
        Delay,
    );

    // Alarm indicators, all off at boot
    let alarms = [
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_14, Level::Low),
    ];

    info!("Peripherals wired");

    // Spawn tasks
    spawner.spawn(tasks::tick_task(sampling.tick_ms)).unwrap();
    spawner.spawn(tasks::rx_task(rx)).unwrap();
    spawner.spawn(tasks::tx_task(tx)).unwrap();
    spawner.spawn(tasks::edge_task(pulse_pin)).unwrap();
    spawner
        .spawn(tasks::control_task(sampling, sensor, dac, display, alarms))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
