//! Board-agnostic logic for the Metron acquisition controller.
//!
//! Everything here is pure and host-testable. The [`Controller`]
//! consumes completed serial lines, timer ticks, and acquired samples,
//! and emits [`Effect`]s for the firmware crate to carry out against
//! real peripherals. Hardware sits behind the traits in [`traits`];
//! drivers implement them, tests fake them.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod display;
pub mod sampling;
pub mod state;
pub mod traits;

pub use config::{LinkConfig, SamplingConfig};
pub use controller::{Controller, Effect, Effects, Sample, SampleRequest};
pub use sampling::{PulseAccumulator, SampleGate, SensorReading};
pub use state::{Acquisition, ChannelMode, CommandOutcome};
pub use traits::{AnalogFeedback, FeedbackLevels, TextDisplay};
