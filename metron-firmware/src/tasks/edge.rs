//! Pulse edge counting task
//!
//! Counts falling edges on the frequency input while capture is
//! enabled. The counter sits behind a critical-section mutex so the
//! control task can snapshot-and-clear it atomically at each sample
//! boundary.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;

use crate::channels::{EDGE_CAPTURE, PULSE_COUNT};

/// Edge task - counts pulses on the frequency input
#[embassy_executor::task]
pub async fn edge_task(mut pin: Input<'static>) {
    info!("Edge task started");

    let mut enabled = false;

    loop {
        if enabled {
            match select(pin.wait_for_falling_edge(), EDGE_CAPTURE.wait()).await {
                Either::First(()) => {
                    PULSE_COUNT.lock(|pulses| pulses.borrow_mut().record_edge());
                }
                Either::Second(enable) => enabled = enable,
            }
        } else {
            enabled = EDGE_CAPTURE.wait().await;
        }
    }
}
