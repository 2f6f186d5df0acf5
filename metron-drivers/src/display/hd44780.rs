//! Parallel character panel driver.
//!
//! Drives an HD44780-style 2x16 module over the four-bit interface:
//! register select, enable, and the upper data nibble. Writes are
//! timed rather than polled; the busy flag is never read, so the data
//! pins stay plain outputs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use metron_core::TextDisplay;

/// DDRAM base address of each row.
const ROW_ADDR: [u8; 2] = [0x80, 0xC0];

const FUNCTION_SET_4BIT: u8 = 0x28;
const DISPLAY_ON: u8 = 0x0C;
const ENTRY_MODE: u8 = 0x06;
const CLEAR: u8 = 0x01;

/// HD44780 over a four-bit parallel interface.
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    data: [P; 4],
    delay: D,
}

impl<P, D> Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Data pins in bus order: `d4` carries the least significant bit
    /// of each nibble.
    pub fn new(rs: P, en: P, d4: P, d5: P, d6: P, d7: P, delay: D) -> Self {
        Self {
            rs,
            en,
            data: [d4, d5, d6, d7],
            delay,
        }
    }

    /// Power-on initialization: 4-bit mode, two lines, cursor off.
    pub fn init(&mut self) -> Result<(), P::Error> {
        self.delay.delay_ms(15);
        // Three 8-bit function-set nibbles resynchronize the interface
        // whatever mode the controller woke up in, then one more drops
        // it into 4-bit mode.
        self.write_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, false)?;
        self.delay.delay_us(150);

        self.command(FUNCTION_SET_4BIT)?;
        self.command(DISPLAY_ON)?;
        self.command(ENTRY_MODE)?;
        self.command(CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn command(&mut self, byte: u8) -> Result<(), P::Error> {
        self.write_byte(byte, false)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), P::Error> {
        self.command(ROW_ADDR[usize::from(row.min(1))] | (col & 0x0F))
    }

    fn write_byte(&mut self, byte: u8, data: bool) -> Result<(), P::Error> {
        self.write_nibble(byte >> 4, data)?;
        self.write_nibble(byte & 0x0F, data)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), P::Error> {
        self.rs.set_state(PinState::from(data))?;
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from(nibble >> bit & 1 == 1))?;
        }
        self.en.set_high()?;
        self.delay.delay_us(1);
        self.en.set_low()?;
        self.delay.delay_us(1);
        Ok(())
    }
}

impl<P, D> TextDisplay for Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = P::Error;

    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), P::Error> {
        self.set_cursor(row, col)?;
        for byte in text.bytes() {
            self.write_byte(byte, true)?;
        }
        Ok(())
    }
}
