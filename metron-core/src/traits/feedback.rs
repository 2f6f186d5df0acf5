//! Analog feedback output abstraction.

/// Output levels for the feedback converter, one shape per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackLevels {
    /// Temperature and humidity levels, written in that order.
    Pair { temp: u8, humi: u8 },
    /// Frequency-channel level.
    Single(u8),
}

/// Sink for host feedback levels.
pub trait AnalogFeedback {
    type Error;

    /// Drive the output to the given levels.
    fn write(&mut self, levels: FeedbackLevels) -> Result<(), Self::Error>;
}
