//! Main control task
//!
//! Owns the acquisition controller and every slow peripheral. Receives
//! completed lines and ticks, runs the controller, and carries its
//! effects out against the panel, the feedback converter, the alarm
//! indicators, and the serial TX queue.

use defmt::*;
use embassy_rp::gpio::Level;

use metron_core::{
    AnalogFeedback, Controller, Effect, Effects, Sample, SampleRequest, SamplingConfig,
    TextDisplay,
};
use metron_protocol::{diagnostic, ReportLine};

use crate::board::{AlarmPins, DacDriver, DisplayDriver, SensorDriver};
use crate::channels::{ControlEvent, CONTROL_CHANNEL, EDGE_CAPTURE, PULSE_COUNT, TX_CHANNEL};

/// Control task - main coordination loop
#[embassy_executor::task]
pub async fn control_task(
    sampling: SamplingConfig,
    mut sensor: SensorDriver,
    mut dac: DacDriver,
    mut display: DisplayDriver,
    mut alarms: AlarmPins,
) {
    info!("Control task started");

    // Panel init failure is logged but not fatal: the serial side of
    // the firmware still works without it.
    if let Err(e) = display.init() {
        warn!("Display init failed: {:?}", Debug2Format(&e));
    }

    send_line(diagnostic("Init OK"));

    let mut controller = Controller::new(&sampling);

    loop {
        match CONTROL_CHANNEL.receive().await {
            ControlEvent::Line(line) => {
                trace!("Line: {} bytes", line.len());
                let effects = controller.on_line(&line);
                apply_effects(effects, &mut dac, &mut display, &mut alarms);
            }
            ControlEvent::Tick => {
                if let Some(request) = controller.on_tick() {
                    let sample = acquire(request, &mut sensor);
                    let effects = controller.on_sample(sample);
                    apply_effects(effects, &mut dac, &mut display, &mut alarms);
                }
            }
        }
    }
}

/// Acquire the requested sample from its peripheral.
fn acquire(request: SampleRequest, sensor: &mut SensorDriver) -> Sample {
    match request {
        SampleRequest::TempHumidity => match sensor.read() {
            Ok(reading) => {
                debug!("Sensor: {}C {}%", reading.temperature, reading.humidity);
                Sample::TempHumidity(Some(reading))
            }
            Err(e) => {
                warn!("Sensor read failed: {:?}", Debug2Format(&e));
                Sample::TempHumidity(None)
            }
        },
        SampleRequest::Frequency => {
            let count = PULSE_COUNT.lock(|pulses| pulses.borrow_mut().take());
            debug!("Pulses: {}", count);
            Sample::Frequency(count)
        }
    }
}

/// Carry out one step's effects, in order.
fn apply_effects(
    effects: Effects,
    dac: &mut DacDriver,
    display: &mut DisplayDriver,
    alarms: &mut AlarmPins,
) {
    for effect in effects {
        match effect {
            Effect::Serial(line) => send_line(line),
            Effect::Analog(levels) => {
                // No retry: the host hears about it and decides.
                if let Err(e) = dac.write(levels) {
                    warn!("DAC write failed: {:?}", Debug2Format(&e));
                    send_line(diagnostic("DAC ABSENT"));
                }
            }
            Effect::DisplayText { row, col, text } => {
                let _ = display.text(row, col, text);
            }
            Effect::DisplayNumber { row, col, value, digits } => {
                let _ = display.number(row, col, value, digits);
            }
            Effect::Alarm { id, active } => {
                let level = if active { Level::High } else { Level::Low };
                alarms[id.index()].set_level(level);
            }
            Effect::EdgeCapture(enable) => EDGE_CAPTURE.signal(enable),
            Effect::ClearPulseCount => {
                PULSE_COUNT.lock(|pulses| pulses.borrow_mut().reset());
            }
        }
    }
}

/// Queue a line for the TX task, dropping if the link is backed up.
fn send_line(line: ReportLine) {
    if TX_CHANNEL.try_send(line).is_err() {
        warn!("TX channel full, dropping line");
    }
}
