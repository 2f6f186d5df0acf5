//! Bit-banged peripheral drivers for the Metron acquisition controller.
//!
//! Every driver is generic over [`embedded_hal`] pin and delay traits,
//! so the same code runs against RP2040 GPIO in the firmware and
//! against mock pins in the tests here.

#![no_std]
#![deny(unsafe_code)]

pub mod dac;
pub mod display;
pub mod sensor;

pub use dac::{DacConfig, DacError, Pcf8591};
pub use display::Hd44780;
pub use sensor::{Dht11, DhtError};
