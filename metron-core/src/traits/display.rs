//! Character display abstraction.

use core::fmt::Write;

use heapless::String;

/// A row/column addressed character display.
///
/// The controller talks to the display exclusively through this trait;
/// the real HD44780 driver implements it in the driver crate, and tests
/// substitute a recording fake.
pub trait TextDisplay {
    type Error;

    /// Write `text` starting at the given row and column.
    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), Self::Error>;

    /// Write `value` zero-padded to exactly `digits` digits.
    ///
    /// Values wider than `digits` keep their least significant digits,
    /// so a value can never smear outside its slot on the panel.
    fn number(&mut self, row: u8, col: u8, value: u32, digits: u8) -> Result<(), Self::Error> {
        let digits = digits.min(10);
        let shown = match 10u32.checked_pow(u32::from(digits)) {
            Some(modulus) => value % modulus,
            None => value,
        };
        let mut buf: String<10> = String::new();
        let _ = write!(buf, "{:0width$}", shown, width = usize::from(digits));
        self.text(row, col, &buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use heapless::Vec;

    #[derive(Default)]
    struct Recorder {
        writes: Vec<(u8, u8, String<16>), 8>,
    }

    impl TextDisplay for Recorder {
        type Error = Infallible;

        fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), Infallible> {
            let mut owned = String::new();
            let _ = owned.push_str(text);
            let _ = self.writes.push((row, col, owned));
            Ok(())
        }
    }

    #[test]
    fn test_small_values_are_zero_padded() {
        let mut display = Recorder::default();
        display.number(0, 6, 5, 2).unwrap();
        assert_eq!(display.writes[0], (0, 6, String::try_from("05").unwrap()));
    }

    #[test]
    fn test_wide_values_keep_their_least_significant_digits() {
        let mut display = Recorder::default();
        display.number(0, 0, 123, 2).unwrap();
        assert_eq!(display.writes[0].2.as_str(), "23");
    }

    #[test]
    fn test_five_digit_slot_fits_the_frequency_range() {
        let mut display = Recorder::default();
        display.number(0, 6, 42, 5).unwrap();
        assert_eq!(display.writes[0].2.as_str(), "00042");
    }

    #[test]
    fn test_ten_digits_shows_the_full_value() {
        let mut display = Recorder::default();
        display.number(1, 0, u32::MAX, 10).unwrap();
        assert_eq!(display.writes[0].2.as_str(), "4294967295");
    }
}
