//! Host UART receive task
//!
//! Accumulates inbound bytes into lines and queues them for the
//! control task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use metron_protocol::LineAssembler;

use crate::channels::{ControlEvent, CONTROL_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Host RX task - assembles lines from the serial link
#[embassy_executor::task]
pub async fn rx_task(mut rx: BufferedUartRx) {
    info!("Host RX task started");

    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(line) = assembler.feed(byte) {
                        if CONTROL_CHANNEL.try_send(ControlEvent::Line(line)).is_err() {
                            warn!("Control channel full, dropping line");
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
