//! 2x16 panel layout.
//!
//! The panel uses fixed slots: labels are painted once when a channel
//! is entered, value slots are repainted on every sample. Columns are
//! chosen so the value slots land inside the blank run of each label.
//!
//! ```text
//! Temp:  23 C         Freq:  00010 Hz
//! Humi:  45 %
//! ```

/// Sixteen spaces, for blanking a row in one paint.
pub const BLANK_ROW: &str = "                ";

pub const TEMP_LABEL: &str = "Temp:    C";
pub const HUMI_LABEL: &str = "Humi:    %";
pub const FREQ_LABEL: &str = "Freq:";
pub const FREQ_UNIT: &str = "Hz";

pub const TEMP_ROW: u8 = 0;
pub const TEMP_COL: u8 = 6;
pub const TEMP_DIGITS: u8 = 2;

pub const HUMI_ROW: u8 = 1;
pub const HUMI_COL: u8 = 6;
pub const HUMI_DIGITS: u8 = 2;

pub const FREQ_ROW: u8 = 0;
pub const FREQ_COL: u8 = 6;
pub const FREQ_DIGITS: u8 = 5;
pub const FREQ_UNIT_COL: u8 = 12;

/// Painted in both value slots when a sensor read fails.
pub const SENSOR_FAIL_SENTINEL: u32 = 99;
