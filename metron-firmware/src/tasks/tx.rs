//! Host UART transmit task
//!
//! Drains queued report and diagnostic lines onto the serial link.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::TX_CHANNEL;

/// Host TX task - writes queued lines to the serial link
#[embassy_executor::task]
pub async fn tx_task(mut tx: BufferedUartTx) {
    info!("Host TX task started");

    loop {
        let line = TX_CHANNEL.receive().await;
        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("UART write error: {:?}", e);
        }
    }
}
