//! Hardware abstraction seams.
//!
//! Drivers implement these traits against real peripherals; tests
//! implement them with recording fakes.

pub mod display;
pub mod feedback;

pub use display::TextDisplay;
pub use feedback::{AnalogFeedback, FeedbackLevels};
