//! Two-wire feedback converter driver.
//!
//! Bit-bangs a PCF8591 write transaction over clock and data pins:
//! start condition, address byte with the write bit, analog-output
//! control byte, one level byte, stop condition. Every byte must be
//! acknowledged. A missing acknowledge aborts the transaction after
//! the current clock cycle, and the stop condition still runs so the
//! bus is always left released.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use metron_core::{AnalogFeedback, FeedbackLevels};

/// Control byte that enables the analog output stage.
const CONTROL_ANALOG_OUT: u8 = 0x40;
/// Half of one clock period.
const HALF_PERIOD_US: u32 = 5;
/// Polls for an acknowledge before giving up.
const ACK_ATTEMPTS: u32 = 50;

/// Converter wiring and timing.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DacConfig {
    /// Seven-bit bus address.
    pub address: u8,
    /// Pause between the two writes of a pair, letting the first
    /// output settle.
    pub settle_ms: u32,
}

impl Default for DacConfig {
    fn default() -> Self {
        Self {
            address: 0x48,
            settle_ms: 1,
        }
    }
}

/// Converter write failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacError<E> {
    /// A bus pin failed.
    Pin(E),
    /// The converter never acknowledged a byte.
    NoAck,
}

impl<E> From<E> for DacError<E> {
    fn from(error: E) -> Self {
        DacError::Pin(error)
    }
}

/// Bit-banged PCF8591 driver.
///
/// The data pin must be open-drain: the driver releases it high to
/// listen for acknowledges.
pub struct Pcf8591<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
    config: DacConfig,
}

impl<SCL, SDA, D, E> Pcf8591<SCL, SDA, D>
where
    SCL: OutputPin<Error = E>,
    SDA: InputPin<Error = E> + OutputPin<Error = E>,
    D: DelayNs,
{
    pub fn new(scl: SCL, sda: SDA, delay: D, config: DacConfig) -> Self {
        Self {
            scl,
            sda,
            delay,
            config,
        }
    }

    /// Write one output level as a full bus transaction.
    pub fn write_output(&mut self, level: u8) -> Result<(), DacError<E>> {
        self.start()?;
        let result = self.write_frame(level);
        // The stop condition runs acknowledged or not, so an absent
        // converter never leaves the bus claimed.
        self.stop()?;
        result
    }

    fn write_frame(&mut self, level: u8) -> Result<(), DacError<E>> {
        self.write_byte(self.config.address << 1)?;
        self.write_byte(CONTROL_ANALOG_OUT)?;
        self.write_byte(level)
    }

    fn start(&mut self) -> Result<(), DacError<E>> {
        self.sda.set_high()?;
        self.scl.set_high()?;
        self.delay.delay_us(HALF_PERIOD_US);
        self.sda.set_low()?;
        self.delay.delay_us(HALF_PERIOD_US);
        self.scl.set_low()?;
        self.delay.delay_us(HALF_PERIOD_US);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DacError<E>> {
        self.sda.set_low()?;
        self.delay.delay_us(HALF_PERIOD_US);
        self.scl.set_high()?;
        self.delay.delay_us(HALF_PERIOD_US);
        self.sda.set_high()?;
        self.delay.delay_us(HALF_PERIOD_US);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), DacError<E>> {
        for bit in (0..8).rev() {
            self.sda.set_state(PinState::from(byte >> bit & 1 == 1))?;
            self.scl.set_high()?;
            self.delay.delay_us(HALF_PERIOD_US);
            self.scl.set_low()?;
            self.delay.delay_us(HALF_PERIOD_US);
        }
        self.read_ack()
    }

    fn read_ack(&mut self) -> Result<(), DacError<E>> {
        // Release the data line so the converter can pull it low.
        self.sda.set_high()?;
        self.scl.set_high()?;
        self.delay.delay_us(HALF_PERIOD_US);

        let mut acked = false;
        for _ in 0..ACK_ATTEMPTS {
            if self.sda.is_low()? {
                acked = true;
                break;
            }
            self.delay.delay_us(1);
        }

        // Finish the clock cycle either way so an abort leaves the
        // current bit complete.
        self.scl.set_low()?;
        self.delay.delay_us(HALF_PERIOD_US);

        if acked {
            Ok(())
        } else {
            Err(DacError::NoAck)
        }
    }
}

impl<SCL, SDA, D, E> AnalogFeedback for Pcf8591<SCL, SDA, D>
where
    SCL: OutputPin<Error = E>,
    SDA: InputPin<Error = E> + OutputPin<Error = E>,
    D: DelayNs,
{
    type Error = DacError<E>;

    fn write(&mut self, levels: FeedbackLevels) -> Result<(), DacError<E>> {
        match levels {
            FeedbackLevels::Pair { temp, humi } => {
                self.write_output(temp)?;
                self.delay.delay_ms(self.config.settle_ms);
                self.write_output(humi)
            }
            FeedbackLevels::Single(level) => self.write_output(level),
        }
    }
}
