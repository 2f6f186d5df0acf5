//! Board wiring helpers.
//!
//! The drivers are generic over embedded-hal traits; this module pins
//! them to the RP2040 GPIO types used on this board and provides the
//! open-drain adapter the sensor and converter buses need.

use core::convert::Infallible;

use embassy_rp::gpio::{Flex, Output, Pull};
use embassy_time::Delay;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use metron_drivers::{Dht11, Hd44780, Pcf8591};

/// Open-drain view of a GPIO: low drives the line, high releases it to
/// the pull-up.
pub struct OpenDrain {
    pin: Flex<'static>,
}

impl OpenDrain {
    pub fn new(mut pin: Flex<'static>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self { pin }
    }
}

impl ErrorType for OpenDrain {
    type Error = Infallible;
}

impl OutputPin for OpenDrain {
    fn set_low(&mut self) -> Result<(), Infallible> {
        // Latch low before taking the line so it never glitches high.
        self.pin.set_low();
        self.pin.set_as_output();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        // Released, not driven: the pull-up raises the line.
        self.pin.set_as_input();
        Ok(())
    }
}

impl InputPin for OpenDrain {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_low())
    }
}

/// DHT11 on its open-drain data pin.
pub type SensorDriver = Dht11<OpenDrain, Delay>;

/// PCF8591 on a push-pull clock and an open-drain data pin.
pub type DacDriver = Pcf8591<Output<'static>, OpenDrain, Delay>;

/// HD44780 panel on the four-bit parallel bus.
pub type DisplayDriver = Hd44780<Output<'static>, Delay>;

/// Alarm indicator outputs, indexed by alarm id.
pub type AlarmPins = [Output<'static>; 3];
