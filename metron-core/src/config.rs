//! Runtime configuration.
//!
//! Nothing here is persisted; the firmware builds these once at boot
//! from the defaults and hands them to the tasks that need them.

/// Sampling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Tick period in milliseconds.
    pub tick_ms: u32,
    /// Ticks per sample. Ten ticks of 100 ms give the one-second
    /// sample cadence.
    pub gate_ticks: u8,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            gate_ticks: 10,
        }
    }
}

/// Serial link parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConfig {
    pub baudrate: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}
