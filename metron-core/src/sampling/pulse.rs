//! Edge counting for the frequency channel.

/// Wrapping counter for detected pulse edges.
///
/// The firmware keeps one of these behind a critical-section mutex so
/// the edge task and the control task never race. [`take`] snapshots
/// and clears in a single call; with both steps under one lock no edge
/// is counted twice or lost between samples.
///
/// [`take`]: PulseAccumulator::take
#[derive(Debug, Clone, Default)]
pub struct PulseAccumulator {
    count: u32,
}

impl PulseAccumulator {
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Record one detected edge.
    pub fn record_edge(&mut self) {
        self.count = self.count.wrapping_add(1);
    }

    /// Snapshot the count and restart from zero.
    pub fn take(&mut self) -> u32 {
        let count = self.count;
        self.count = 0;
        count
    }

    /// Discard accumulated edges without reading them.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Current count, left in place.
    pub fn count(&self) -> u32 {
        self.count
    }
}
