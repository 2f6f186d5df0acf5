//! One-wire temperature/humidity sensor driver.
//!
//! The DHT11 answers a long start pulse with a presence handshake and
//! then streams forty bits, each encoded in the width of a high pulse.
//! Sampling the line ~40 µs after the rising edge separates the two
//! widths: still high means 1, already low means 0. The five data
//! bytes are humidity-integral, humidity-fraction, temperature-integral,
//! temperature-fraction, and a wrapping-sum checksum over the first
//! four.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use metron_core::SensorReading;

/// Start pulse width. The sensor wants at least 18 ms low.
const START_LOW_MS: u32 = 20;
/// Bus release before listening for the presence pulse.
const START_RELEASE_US: u32 = 30;
/// Rising-edge-to-sample delay that separates short and long pulses.
const BIT_SAMPLE_DELAY_US: u32 = 40;
/// Polls before a missing level change becomes a timeout.
const MAX_ATTEMPTS: u32 = 100;

/// DHT11 read failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DhtError<E> {
    /// The data pin itself failed.
    Pin(E),
    /// The sensor missed a handshake or bit deadline.
    Timeout,
    /// A full frame arrived but its checksum does not cover it.
    ChecksumMismatch,
}

impl<E> From<E> for DhtError<E> {
    fn from(error: E) -> Self {
        DhtError::Pin(error)
    }
}

/// Bit-banged DHT11 driver over a single open-drain data pin.
pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Run one full read transaction, around 25 ms of bus time.
    ///
    /// There is no retry here; the caller decides what a failed sample
    /// means.
    pub fn read(&mut self) -> Result<SensorReading, DhtError<P::Error>> {
        self.send_start()?;
        self.wait_for_ack()?;

        let mut frame = [0u8; 5];
        for byte in &mut frame {
            *byte = self.read_byte()?;
        }

        let sum = frame[..4]
            .iter()
            .fold(0u8, |sum, &byte| sum.wrapping_add(byte));
        if sum != frame[4] {
            return Err(DhtError::ChecksumMismatch);
        }

        Ok(SensorReading {
            humidity: frame[0],
            temperature: frame[2],
        })
    }

    fn send_start(&mut self) -> Result<(), DhtError<P::Error>> {
        self.pin.set_low()?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high()?;
        self.delay.delay_us(START_RELEASE_US);
        Ok(())
    }

    /// The presence handshake: the sensor pulls low, releases high,
    /// then pulls low again to lead into the first bit.
    fn wait_for_ack(&mut self) -> Result<(), DhtError<P::Error>> {
        self.wait_for_state(PinState::Low)?;
        self.wait_for_state(PinState::High)?;
        self.wait_for_state(PinState::Low)
    }

    fn read_byte(&mut self) -> Result<u8, DhtError<P::Error>> {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte <<= 1;
            if self.read_bit()? {
                byte |= 1;
            }
        }
        Ok(byte)
    }

    fn read_bit(&mut self) -> Result<bool, DhtError<P::Error>> {
        self.wait_for_state(PinState::High)?;
        self.delay.delay_us(BIT_SAMPLE_DELAY_US);
        let bit = self.pin.is_high()?;
        if bit {
            // Long pulse: wait out the rest so the next bit starts clean.
            self.wait_for_state(PinState::Low)?;
        }
        Ok(bit)
    }

    fn wait_for_state(&mut self, state: PinState) -> Result<(), DhtError<P::Error>> {
        for _ in 0..MAX_ATTEMPTS {
            let reached = match state {
                PinState::High => self.pin.is_high()?,
                PinState::Low => self.pin.is_low()?,
            };
            if reached {
                return Ok(());
            }
            self.delay.delay_us(1);
        }
        Err(DhtError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;
    use std::vec::Vec;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

    use super::*;

    fn start_and_ack() -> Vec<PinTransaction> {
        vec![
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::get(State::Low),
            PinTransaction::get(State::High),
            PinTransaction::get(State::Low),
        ]
    }

    fn push_byte(expectations: &mut Vec<PinTransaction>, byte: u8) {
        for bit in (0..8).rev() {
            expectations.push(PinTransaction::get(State::High));
            if byte >> bit & 1 == 1 {
                expectations.push(PinTransaction::get(State::High));
                expectations.push(PinTransaction::get(State::Low));
            } else {
                expectations.push(PinTransaction::get(State::Low));
            }
        }
    }

    #[test]
    fn test_start_pulse_drives_the_bus_low_then_releases() {
        let expectations = [
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ];
        let mut dht11 = Dht11::new(PinMock::new(&expectations), NoopDelay::new());
        dht11.send_start().unwrap();
        dht11.pin.done();
    }

    #[test]
    fn test_bits_decode_by_pulse_width_msb_first() {
        let mut expectations = Vec::new();
        push_byte(&mut expectations, 0b1010_0011);
        let mut dht11 = Dht11::new(PinMock::new(&expectations), NoopDelay::new());
        assert_eq!(dht11.read_byte().unwrap(), 0b1010_0011);
        dht11.pin.done();
    }

    #[test]
    fn test_reads_a_complete_frame() {
        let mut expectations = start_and_ack();
        for byte in [45, 0, 23, 0, 68] {
            push_byte(&mut expectations, byte);
        }
        let mut dht11 = Dht11::new(PinMock::new(&expectations), NoopDelay::new());
        let reading = dht11.read().unwrap();
        assert_eq!(
            reading,
            SensorReading {
                temperature: 23,
                humidity: 45,
            }
        );
        dht11.pin.done();
    }

    #[test]
    fn test_corrupt_frame_is_rejected() {
        let mut expectations = start_and_ack();
        // 1 + 2 + 3 + 4 is 10, not the 11 the frame claims.
        for byte in [1, 2, 3, 4, 11] {
            push_byte(&mut expectations, byte);
        }
        let mut dht11 = Dht11::new(PinMock::new(&expectations), NoopDelay::new());
        assert_eq!(dht11.read(), Err(DhtError::ChecksumMismatch));
        dht11.pin.done();
    }

    #[test]
    fn test_missing_presence_pulse_times_out() {
        let mut expectations = vec![
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ];
        // The bus never goes low: every poll of the handshake sees high.
        expectations.extend(vec![PinTransaction::get(State::High); MAX_ATTEMPTS as usize]);
        let mut dht11 = Dht11::new(PinMock::new(&expectations), NoopDelay::new());
        assert_eq!(dht11.read(), Err(DhtError::Timeout));
        dht11.pin.done();
    }
}
