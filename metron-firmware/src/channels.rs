//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use metron_core::PulseAccumulator;
use metron_protocol::{Line, ReportLine};

/// Channel capacity for control events (lines and ticks)
const CONTROL_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound report lines
const TX_CHANNEL_SIZE: usize = 8;

/// One unit of work for the control task.
#[derive(Debug, Clone)]
pub enum ControlEvent {
    /// A completed inbound line.
    Line(Line),
    /// One period of the sampling tick.
    Tick,
}

/// Completed lines and sampling ticks, in arrival order
pub static CONTROL_CHANNEL: Channel<CriticalSectionRawMutex, ControlEvent, CONTROL_CHANNEL_SIZE> =
    Channel::new();

/// Outbound lines for the serial TX task
pub static TX_CHANNEL: Channel<CriticalSectionRawMutex, ReportLine, TX_CHANNEL_SIZE> =
    Channel::new();

/// Whether the edge task should be counting pulses (updated by control task)
pub static EDGE_CAPTURE: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Pulse counter shared between the edge task and the control task.
/// Snapshot-and-clear runs inside a single critical section, so no
/// edge is counted twice or lost between samples.
pub static PULSE_COUNT: Mutex<CriticalSectionRawMutex, RefCell<PulseAccumulator>> =
    Mutex::new(RefCell::new(PulseAccumulator::new()));
