//! Host-visible controller state.

pub mod machine;

pub use machine::{Acquisition, ChannelMode, CommandOutcome};
