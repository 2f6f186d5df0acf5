//! Sampling tick task
//!
//! Drives the control task's sense of time. The tick stays short so
//! commands interleave promptly; the controller divides it down to the
//! sample cadence.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::{ControlEvent, CONTROL_CHANNEL};

/// Tick task - sends one control event per tick period
#[embassy_executor::task]
pub async fn tick_task(tick_ms: u32) {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(tick_ms)));

    loop {
        ticker.next().await;

        if CONTROL_CHANNEL.try_send(ControlEvent::Tick).is_err() {
            warn!("Control channel full, dropping tick");
        }
    }
}
