//! Acquisition state machine.
//!
//! Tracks the three things the host can change: which channel is
//! selected, whether periodic collection runs, and which alarm
//! indicators are raised. The machine holds no sample data and no
//! timing; it only answers "what should be happening right now".

use metron_protocol::{AlarmId, Command};

/// Which input channel the firmware samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelMode {
    /// Boot state: no channel selected yet, ticks sample nothing.
    #[default]
    Standby,
    /// One-wire temperature/humidity sensor.
    TempHumidity,
    /// Edge-counted frequency input.
    Frequency,
}

/// What a command changed, for the controller to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// Collection was started or stopped.
    Collect,
    /// A channel was selected.
    Channel,
    /// An alarm indicator was set or cleared.
    Alarm(AlarmId),
}

/// Host-visible acquisition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquisition {
    mode: ChannelMode,
    collect_enabled: bool,
    alarms: [bool; 3],
}

impl Acquisition {
    pub const fn new() -> Self {
        Self {
            mode: ChannelMode::Standby,
            collect_enabled: false,
            alarms: [false; 3],
        }
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    pub fn collect_enabled(&self) -> bool {
        self.collect_enabled
    }

    pub fn alarm(&self, id: AlarmId) -> bool {
        self.alarms[id.index()]
    }

    /// Whether the pulse input should be counting edges right now.
    ///
    /// Edges only matter while the frequency channel is both selected
    /// and collecting; outside that window the counter stays idle.
    pub fn edge_capture_enabled(&self) -> bool {
        self.collect_enabled && self.mode == ChannelMode::Frequency
    }

    /// Apply one host command.
    ///
    /// Channel selection reports [`CommandOutcome::Channel`] even when
    /// the selected channel is already active, so re-selection repaints
    /// the display and restarts the sample interval the same way a
    /// fresh selection does.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Start => {
                self.collect_enabled = true;
                CommandOutcome::Collect
            }
            Command::Stop => {
                self.collect_enabled = false;
                CommandOutcome::Collect
            }
            Command::SelectTempHumidity => {
                self.mode = ChannelMode::TempHumidity;
                CommandOutcome::Channel
            }
            Command::SelectFrequency => {
                self.mode = ChannelMode::Frequency;
                CommandOutcome::Channel
            }
            Command::AlarmSet(id) => {
                self.alarms[id.index()] = true;
                CommandOutcome::Alarm(id)
            }
            Command::AlarmClear(id) => {
                self.alarms[id.index()] = false;
                CommandOutcome::Alarm(id)
            }
        }
    }
}

impl Default for Acquisition {
    fn default() -> Self {
        Self::new()
    }
}
