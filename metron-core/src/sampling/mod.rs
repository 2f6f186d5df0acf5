//! Sampling cadence and acquisition primitives.

pub mod gate;
pub mod pulse;

pub use gate::SampleGate;
pub use pulse::PulseAccumulator;

/// One successful temperature/humidity acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Degrees Celsius, integral part.
    pub temperature: u8,
    /// Percent relative humidity, integral part.
    pub humidity: u8,
}
