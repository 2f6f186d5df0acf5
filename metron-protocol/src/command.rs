//! Host command alphabet.
//!
//! Each command is a single ASCII letter carried in a `CMD:` frame.
//! Alarm letters come in case pairs: upper case raises the indicator,
//! lower case clears it.

/// Which alarm indicator a command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmId {
    Temperature,
    Humidity,
    Frequency,
}

impl AlarmId {
    /// Stable index of this alarm, for indexing indicator arrays.
    pub fn index(self) -> usize {
        match self {
            AlarmId::Temperature => 0,
            AlarmId::Humidity => 1,
            AlarmId::Frequency => 2,
        }
    }
}

/// A decoded host command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `S`: begin periodic collection on the selected channel.
    Start,
    /// `E`: stop periodic collection.
    Stop,
    /// `A`: select the temperature/humidity channel.
    SelectTempHumidity,
    /// `B`: select the frequency channel.
    SelectFrequency,
    /// `X`/`Y`/`Z`: raise an alarm indicator.
    AlarmSet(AlarmId),
    /// `x`/`y`/`z`: clear an alarm indicator.
    AlarmClear(AlarmId),
}

impl Command {
    /// Decode a command letter. `None` for letters this firmware does
    /// not know.
    pub fn from_byte(byte: u8) -> Option<Command> {
        match byte {
            b'S' => Some(Command::Start),
            b'E' => Some(Command::Stop),
            b'A' => Some(Command::SelectTempHumidity),
            b'B' => Some(Command::SelectFrequency),
            b'X' => Some(Command::AlarmSet(AlarmId::Temperature)),
            b'x' => Some(Command::AlarmClear(AlarmId::Temperature)),
            b'Y' => Some(Command::AlarmSet(AlarmId::Humidity)),
            b'y' => Some(Command::AlarmClear(AlarmId::Humidity)),
            b'Z' => Some(Command::AlarmSet(AlarmId::Frequency)),
            b'z' => Some(Command::AlarmClear(AlarmId::Frequency)),
            _ => None,
        }
    }

    /// The letter that encodes this command on the wire.
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Start => b'S',
            Command::Stop => b'E',
            Command::SelectTempHumidity => b'A',
            Command::SelectFrequency => b'B',
            Command::AlarmSet(AlarmId::Temperature) => b'X',
            Command::AlarmClear(AlarmId::Temperature) => b'x',
            Command::AlarmSet(AlarmId::Humidity) => b'Y',
            Command::AlarmClear(AlarmId::Humidity) => b'y',
            Command::AlarmSet(AlarmId::Frequency) => b'Z',
            Command::AlarmClear(AlarmId::Frequency) => b'z',
        }
    }
}
