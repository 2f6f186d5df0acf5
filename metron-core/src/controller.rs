//! Line/tick/sample orchestration.
//!
//! The [`Controller`] is a pure state machine: completed lines, timer
//! ticks, and acquired samples go in, [`Effect`]s come out. It touches
//! no hardware and awaits nothing, so the whole command surface is
//! testable on the host. The firmware's control task owns one and
//! carries its effects out against the real peripherals.

use heapless::Vec;
use metron_protocol::{
    classify, diagnostic, frequency_report, temp_humi_report, AlarmId, Command, Feedback, Frame,
    FrameError, ReportLine,
};

use crate::config::SamplingConfig;
use crate::display;
use crate::sampling::{SampleGate, SensorReading};
use crate::state::{Acquisition, ChannelMode, CommandOutcome};
use crate::traits::FeedbackLevels;

/// What the control task should acquire at a sample boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleRequest {
    TempHumidity,
    Frequency,
}

/// An acquired sample, fed back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sample {
    /// Sensor read result, `None` when the read failed.
    TempHumidity(Option<SensorReading>),
    /// Edges counted since the previous sample boundary.
    Frequency(u32),
}

/// One side effect for the firmware to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Queue a line on the serial TX.
    Serial(ReportLine),
    /// Drive the feedback converter.
    Analog(FeedbackLevels),
    /// Paint text on the panel.
    DisplayText { row: u8, col: u8, text: &'static str },
    /// Paint a zero-padded number on the panel.
    DisplayNumber { row: u8, col: u8, value: u32, digits: u8 },
    /// Drive an alarm indicator.
    Alarm { id: AlarmId, active: bool },
    /// Enable or disable edge counting on the pulse input.
    EdgeCapture(bool),
    /// Discard edges accumulated under the previous channel.
    ClearPulseCount,
}

/// Upper bound on effects from a single controller step.
///
/// A channel change is the widest case: two row blanks, two label
/// paints, a pulse clear, and the edge-capture update.
pub const MAX_EFFECTS: usize = 8;

/// Effects from one step, in execution order.
pub type Effects = Vec<Effect, MAX_EFFECTS>;

const DIAG_BAD_COMMAND: &str = "BAD CMD";
const DIAG_CHECKSUM_MISMATCH: &str = "CHECKSUM MISMATCH";
const DIAG_BAD_FEEDBACK: &str = "BAD FEEDBACK";
const DIAG_SENSOR_FAIL: &str = "DHT11 FAIL";

/// The acquisition controller.
pub struct Controller {
    acq: Acquisition,
    gate: SampleGate,
}

impl Controller {
    pub fn new(config: &SamplingConfig) -> Self {
        Self {
            acq: Acquisition::new(),
            gate: SampleGate::new(config.gate_ticks),
        }
    }

    pub fn mode(&self) -> ChannelMode {
        self.acq.mode()
    }

    pub fn collect_enabled(&self) -> bool {
        self.acq.collect_enabled()
    }

    /// React to one completed inbound line.
    ///
    /// No line is ever fatal: classification failures turn into
    /// diagnostic lines for the host and everything else carries on.
    pub fn on_line(&mut self, line: &[u8]) -> Effects {
        let mut effects = Effects::new();
        match classify(line) {
            Ok(Some(Frame::Command(command))) => self.apply_command(command, &mut effects),
            Ok(Some(Frame::Feedback { levels, .. })) => self.apply_feedback(levels, &mut effects),
            Ok(None) => {}
            Err(FrameError::MalformedCommand) => push_diag(&mut effects, DIAG_BAD_COMMAND),
            Err(FrameError::ChecksumMismatch) => push_diag(&mut effects, DIAG_CHECKSUM_MISMATCH),
            Err(FrameError::BadPayload) => push_diag(&mut effects, DIAG_BAD_FEEDBACK),
        }
        effects
    }

    /// Count one tick. At a sample boundary while collecting, says what
    /// to acquire.
    pub fn on_tick(&mut self) -> Option<SampleRequest> {
        let fired = self.gate.advance();
        if !fired || !self.acq.collect_enabled() {
            return None;
        }
        match self.acq.mode() {
            ChannelMode::Standby => None,
            ChannelMode::TempHumidity => Some(SampleRequest::TempHumidity),
            ChannelMode::Frequency => Some(SampleRequest::Frequency),
        }
    }

    /// Fold an acquired sample into panel and serial effects.
    pub fn on_sample(&mut self, sample: Sample) -> Effects {
        let mut effects = Effects::new();
        match sample {
            Sample::TempHumidity(Some(reading)) => {
                push_temp_humi_values(
                    &mut effects,
                    u32::from(reading.temperature),
                    u32::from(reading.humidity),
                );
                let _ = effects.push(Effect::Serial(temp_humi_report(
                    reading.temperature,
                    reading.humidity,
                )));
            }
            Sample::TempHumidity(None) => {
                push_temp_humi_values(
                    &mut effects,
                    display::SENSOR_FAIL_SENTINEL,
                    display::SENSOR_FAIL_SENTINEL,
                );
                push_diag(&mut effects, DIAG_SENSOR_FAIL);
            }
            Sample::Frequency(count) => {
                let _ = effects.push(Effect::DisplayNumber {
                    row: display::FREQ_ROW,
                    col: display::FREQ_COL,
                    value: count,
                    digits: display::FREQ_DIGITS,
                });
                let _ = effects.push(Effect::Serial(frequency_report(count)));
            }
        }
        effects
    }

    fn apply_command(&mut self, command: Command, effects: &mut Effects) {
        match self.acq.apply(command) {
            CommandOutcome::Collect => {
                // Cleared on stop and again on start: an edge latched
                // while the capture toggle is in flight must never
                // reach a report.
                let _ = effects.push(Effect::ClearPulseCount);
            }
            CommandOutcome::Channel => self.enter_channel(effects),
            CommandOutcome::Alarm(id) => {
                let _ = effects.push(Effect::Alarm {
                    id,
                    active: self.acq.alarm(id),
                });
            }
        }
        // Every command can move the edge-capture window, so the
        // current answer always rides along.
        let _ = effects.push(Effect::EdgeCapture(self.acq.edge_capture_enabled()));
    }

    fn enter_channel(&mut self, effects: &mut Effects) {
        self.gate.reset();
        let _ = effects.push(Effect::DisplayText {
            row: 0,
            col: 0,
            text: display::BLANK_ROW,
        });
        let _ = effects.push(Effect::DisplayText {
            row: 1,
            col: 0,
            text: display::BLANK_ROW,
        });
        match self.acq.mode() {
            ChannelMode::TempHumidity => {
                let _ = effects.push(Effect::DisplayText {
                    row: display::TEMP_ROW,
                    col: 0,
                    text: display::TEMP_LABEL,
                });
                let _ = effects.push(Effect::DisplayText {
                    row: display::HUMI_ROW,
                    col: 0,
                    text: display::HUMI_LABEL,
                });
            }
            ChannelMode::Frequency => {
                let _ = effects.push(Effect::DisplayText {
                    row: display::FREQ_ROW,
                    col: 0,
                    text: display::FREQ_LABEL,
                });
                let _ = effects.push(Effect::DisplayText {
                    row: display::FREQ_ROW,
                    col: display::FREQ_UNIT_COL,
                    text: display::FREQ_UNIT,
                });
            }
            ChannelMode::Standby => {}
        }
        let _ = effects.push(Effect::ClearPulseCount);
    }

    fn apply_feedback(&mut self, levels: Feedback, effects: &mut Effects) {
        match (self.acq.mode(), levels) {
            (ChannelMode::TempHumidity, Feedback::Pair { temp, humi }) => {
                let _ = effects.push(Effect::Analog(FeedbackLevels::Pair {
                    temp: saturate(temp),
                    humi: saturate(humi),
                }));
            }
            (ChannelMode::Frequency, Feedback::Single(level)) => {
                let _ = effects.push(Effect::Analog(FeedbackLevels::Single(saturate(level))));
            }
            // No channel, nowhere to put it; the host is just early.
            (ChannelMode::Standby, _) => {}
            _ => push_diag(effects, DIAG_BAD_FEEDBACK),
        }
    }
}

fn push_temp_humi_values(effects: &mut Effects, temp: u32, humi: u32) {
    let _ = effects.push(Effect::DisplayNumber {
        row: display::TEMP_ROW,
        col: display::TEMP_COL,
        value: temp,
        digits: display::TEMP_DIGITS,
    });
    let _ = effects.push(Effect::DisplayNumber {
        row: display::HUMI_ROW,
        col: display::HUMI_COL,
        value: humi,
        digits: display::HUMI_DIGITS,
    });
}

fn push_diag(effects: &mut Effects, text: &str) {
    let _ = effects.push(Effect::Serial(diagnostic(text)));
}

fn saturate(level: u32) -> u8 {
    level.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::PulseAccumulator;

    fn controller() -> Controller {
        Controller::new(&SamplingConfig::default())
    }

    fn serial_text(effect: &Effect) -> &str {
        match effect {
            Effect::Serial(line) => line.as_str(),
            other => panic!("expected a serial effect, got {:?}", other),
        }
    }

    fn has_analog(effects: &Effects) -> bool {
        effects.iter().any(|effect| matches!(effect, Effect::Analog(_)))
    }

    /// Drive a pulse counter the way the firmware carries out effects.
    fn apply_pulse_effects(effects: &Effects, pulses: &mut PulseAccumulator) {
        for effect in effects {
            if matches!(effect, Effect::ClearPulseCount) {
                pulses.reset();
            }
        }
    }

    #[test]
    fn test_selecting_temp_humidity_repaints_labels() {
        let mut controller = controller();
        let effects = controller.on_line(b"CMD:A");
        assert_eq!(
            &effects[..],
            &[
                Effect::DisplayText { row: 0, col: 0, text: display::BLANK_ROW },
                Effect::DisplayText { row: 1, col: 0, text: display::BLANK_ROW },
                Effect::DisplayText { row: 0, col: 0, text: display::TEMP_LABEL },
                Effect::DisplayText { row: 1, col: 0, text: display::HUMI_LABEL },
                Effect::ClearPulseCount,
                Effect::EdgeCapture(false),
            ]
        );
        assert_eq!(controller.mode(), ChannelMode::TempHumidity);
    }

    #[test]
    fn test_switching_channels_clears_stale_pulses() {
        let mut controller = controller();
        controller.on_line(b"CMD:A");
        let effects = controller.on_line(b"CMD:B");
        assert_eq!(controller.mode(), ChannelMode::Frequency);
        assert!(effects.contains(&Effect::ClearPulseCount));
        assert!(effects.contains(&Effect::DisplayText {
            row: display::FREQ_ROW,
            col: 0,
            text: display::FREQ_LABEL,
        }));
        assert!(effects.contains(&Effect::DisplayText {
            row: display::FREQ_ROW,
            col: display::FREQ_UNIT_COL,
            text: display::FREQ_UNIT,
        }));
    }

    #[test]
    fn test_stop_disables_edge_capture_and_discards_pulses() {
        let mut controller = controller();
        controller.on_line(b"CMD:B");
        let effects = controller.on_line(b"CMD:S");
        assert_eq!(
            &effects[..],
            &[Effect::ClearPulseCount, Effect::EdgeCapture(true)]
        );

        let effects = controller.on_line(b"CMD:E");
        assert!(!controller.collect_enabled());
        assert_eq!(
            &effects[..],
            &[Effect::ClearPulseCount, Effect::EdgeCapture(false)]
        );
    }

    #[test]
    fn test_restart_ignores_edges_latched_around_a_stop() {
        let mut controller = controller();
        let mut pulses = PulseAccumulator::new();
        controller.on_line(b"CMD:B");
        apply_pulse_effects(&controller.on_line(b"CMD:S"), &mut pulses);
        pulses.record_edge();
        pulses.record_edge();

        apply_pulse_effects(&controller.on_line(b"CMD:E"), &mut pulses);
        // An edge already latched by the pin can land after the stop's
        // clear; the restart must sweep it away.
        pulses.record_edge();

        apply_pulse_effects(&controller.on_line(b"CMD:S"), &mut pulses);
        assert_eq!(pulses.take(), 0);
    }

    #[test]
    fn test_one_second_cadence_emits_exact_report() {
        let mut controller = controller();
        controller.on_line(b"CMD:A");
        controller.on_line(b"CMD:S");
        for _ in 0..9 {
            assert_eq!(controller.on_tick(), None);
        }
        assert_eq!(controller.on_tick(), Some(SampleRequest::TempHumidity));

        let effects = controller.on_sample(Sample::TempHumidity(Some(SensorReading {
            temperature: 23,
            humidity: 45,
        })));
        assert_eq!(effects.len(), 3);
        assert_eq!(
            effects[0],
            Effect::DisplayNumber { row: 0, col: 6, value: 23, digits: 2 }
        );
        assert_eq!(
            effects[1],
            Effect::DisplayNumber { row: 1, col: 6, value: 45, digits: 2 }
        );
        assert_eq!(serial_text(&effects[2]), "T:23 H:45 CHECKSUM:254\r\n");
    }

    #[test]
    fn test_frequency_sample_reports_and_paints() {
        let mut controller = controller();
        controller.on_line(b"CMD:B");
        controller.on_line(b"CMD:S");
        for _ in 0..10 {
            controller.on_tick();
        }
        let effects = controller.on_sample(Sample::Frequency(10));
        assert_eq!(effects.len(), 2);
        assert_eq!(
            effects[0],
            Effect::DisplayNumber { row: 0, col: 6, value: 10, digits: 5 }
        );
        assert_eq!(serial_text(&effects[1]), "FREQ:10 CHECKSUM:201\r\n");
    }

    #[test]
    fn test_sensor_failure_paints_sentinels_and_reports() {
        let mut controller = controller();
        controller.on_line(b"CMD:A");
        let effects = controller.on_sample(Sample::TempHumidity(None));
        assert_eq!(effects.len(), 3);
        assert_eq!(
            effects[0],
            Effect::DisplayNumber { row: 0, col: 6, value: 99, digits: 2 }
        );
        assert_eq!(
            effects[1],
            Effect::DisplayNumber { row: 1, col: 6, value: 99, digits: 2 }
        );
        assert_eq!(serial_text(&effects[2]), "DHT11 FAIL\r\n");
    }

    #[test]
    fn test_checksum_mismatch_reports_and_discards() {
        let mut controller = controller();
        controller.on_line(b"CMD:A");
        let effects = controller.on_line(b"12 34 CHECKSUM:999");
        assert_eq!(effects.len(), 1);
        assert_eq!(serial_text(&effects[0]), "CHECKSUM MISMATCH\r\n");
        assert!(!has_analog(&effects));
    }

    #[test]
    fn test_validated_feedback_drives_the_dac() {
        let mut controller = controller();
        controller.on_line(b"CMD:A");
        let effects = controller.on_line(b"12 34 CHECKSUM:234");
        assert_eq!(
            &effects[..],
            &[Effect::Analog(FeedbackLevels::Pair { temp: 12, humi: 34 })]
        );
    }

    #[test]
    fn test_legacy_feedback_drives_the_dac() {
        let mut controller = controller();
        controller.on_line(b"CMD:B");
        let effects = controller.on_line(b"42");
        assert_eq!(&effects[..], &[Effect::Analog(FeedbackLevels::Single(42))]);
    }

    #[test]
    fn test_feedback_levels_saturate_at_full_scale() {
        let mut controller = controller();
        controller.on_line(b"CMD:A");
        let effects = controller.on_line(b"999 1000");
        assert_eq!(
            &effects[..],
            &[Effect::Analog(FeedbackLevels::Pair { temp: 255, humi: 255 })]
        );
    }

    #[test]
    fn test_feedback_arity_must_match_the_channel() {
        let mut controller = controller();
        controller.on_line(b"CMD:B");
        let effects = controller.on_line(b"12 34");
        assert_eq!(effects.len(), 1);
        assert_eq!(serial_text(&effects[0]), "BAD FEEDBACK\r\n");
    }

    #[test]
    fn test_standby_swallows_feedback_silently() {
        let mut controller = controller();
        let effects = controller.on_line(b"12 34");
        assert!(effects.is_empty());
    }

    #[test]
    fn test_unknown_command_letters_do_nothing() {
        let mut controller = controller();
        let effects = controller.on_line(b"CMD:Q");
        assert!(effects.is_empty());
    }

    #[test]
    fn test_malformed_command_reports_a_diagnostic() {
        let mut controller = controller();
        let effects = controller.on_line(b"CMD:");
        assert_eq!(effects.len(), 1);
        assert_eq!(serial_text(&effects[0]), "BAD CMD\r\n");
    }

    #[test]
    fn test_alarm_commands_drive_their_indicator() {
        let mut controller = controller();
        let effects = controller.on_line(b"CMD:Y");
        assert_eq!(
            &effects[..],
            &[
                Effect::Alarm { id: AlarmId::Humidity, active: true },
                Effect::EdgeCapture(false),
            ]
        );
        let effects = controller.on_line(b"CMD:y");
        assert_eq!(
            effects[0],
            Effect::Alarm { id: AlarmId::Humidity, active: false }
        );
    }

    #[test]
    fn test_ticks_without_collection_request_nothing() {
        let mut controller = controller();
        controller.on_line(b"CMD:A");
        for _ in 0..30 {
            assert_eq!(controller.on_tick(), None);
        }
    }

    #[test]
    fn test_standby_ticks_request_nothing_even_while_collecting() {
        let mut controller = controller();
        controller.on_line(b"CMD:S");
        for _ in 0..30 {
            assert_eq!(controller.on_tick(), None);
        }
    }

    #[test]
    fn test_channel_change_restarts_the_sample_interval() {
        let mut controller = controller();
        controller.on_line(b"CMD:A");
        controller.on_line(b"CMD:S");
        for _ in 0..9 {
            controller.on_tick();
        }
        // One tick short of a sample; re-selecting restarts the count.
        controller.on_line(b"CMD:A");
        for _ in 0..9 {
            assert_eq!(controller.on_tick(), None);
        }
        assert_eq!(controller.on_tick(), Some(SampleRequest::TempHumidity));
    }

    mod properties {
        use super::*;
        use core::fmt::Write;
        use metron_protocol::line_checksum;
        use proptest::prelude::*;

        proptest! {
            /// Junk on the line never panics the controller and never
            /// reaches the analog output while no channel is selected.
            #[test]
            fn test_junk_never_drives_the_dac_in_standby(
                line in proptest::collection::vec(any::<u8>(), 0..24),
            ) {
                let mut controller = Controller::new(&SamplingConfig::default());
                let effects = controller.on_line(&line);
                prop_assert!(!has_analog(&effects));
            }

            /// A corrupted guard is always discarded, whatever the
            /// payload says.
            #[test]
            fn test_corrupted_guards_never_drive_the_dac(
                temp in 0u32..1000,
                humi in 0u32..1000,
                declared in 0u32..10000,
            ) {
                let mut body: heapless::String<16> = heapless::String::new();
                let _ = write!(body, "{} {}", temp, humi);
                prop_assume!(declared != u32::from(line_checksum(body.as_bytes())));

                let mut line: heapless::String<32> = heapless::String::new();
                let _ = write!(line, "{} CHECKSUM:{}", body, declared);

                let mut controller = Controller::new(&SamplingConfig::default());
                controller.on_line(b"CMD:A");
                let effects = controller.on_line(line.as_bytes());
                prop_assert!(!has_analog(&effects));
                prop_assert_eq!(serial_text(&effects[0]), "CHECKSUM MISMATCH\r\n");
            }
        }
    }
}
