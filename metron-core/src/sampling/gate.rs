//! Tick-to-sample gating.

/// Divides the periodic tick down to the sampling cadence.
///
/// The tick keeps its short period so the firmware stays responsive;
/// the gate fires once per `threshold` ticks to mark a sample boundary.
#[derive(Debug, Clone)]
pub struct SampleGate {
    ticks: u8,
    threshold: u8,
}

impl SampleGate {
    /// Gate that fires every `threshold` ticks.
    pub const fn new(threshold: u8) -> Self {
        Self { ticks: 0, threshold }
    }

    /// Count one tick. Returns true exactly at each sample boundary.
    pub fn advance(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.threshold {
            self.ticks = 0;
            true
        } else {
            false
        }
    }

    /// Restart the current interval, e.g. on a channel change.
    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}
