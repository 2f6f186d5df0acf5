//! Analog feedback output drivers.

pub mod pcf8591;

pub use pcf8591::{DacConfig, DacError, Pcf8591};
