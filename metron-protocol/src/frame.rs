//! Inbound frame classification.
//!
//! A completed line is one of three things, checked in this order:
//!
//! 1. a command frame, `CMD:` followed by exactly one letter;
//! 2. a checksum-guarded feedback frame, payload then ` CHECKSUM:<n>`;
//! 3. a legacy feedback frame, the bare payload with no guard.
//!
//! Feedback payloads carry one or two space-separated decimal levels.
//! A single level drives the frequency-channel output; a pair drives the
//! temperature and humidity outputs.

use crate::checksum::line_checksum;
use crate::command::Command;

/// Prefix that marks a command frame.
pub const COMMAND_PREFIX: &[u8] = b"CMD:";

/// Marker that splits a guarded feedback frame into payload and checksum.
///
/// The leading space belongs to the marker, not the payload: the checksum
/// covers every byte before it.
pub const CHECKSUM_MARKER: &[u8] = b" CHECKSUM:";

/// Feedback levels decoded from a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feedback {
    /// Two levels, for the temperature and humidity outputs.
    Pair { temp: u32, humi: u32 },
    /// One level, for the frequency-channel output.
    Single(u32),
}

/// A successfully classified inbound line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// A recognized command frame.
    Command(Command),
    /// A feedback frame. `validated` is true when a checksum guard was
    /// present and matched.
    Feedback { levels: Feedback, validated: bool },
}

/// Why a line could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// `CMD:` prefix without exactly one byte of command.
    MalformedCommand,
    /// Checksum guard present but unreadable or not matching the payload.
    ChecksumMismatch,
    /// Feedback payload that is not one or two decimal fields.
    BadPayload,
}

/// Classify a completed line.
///
/// `Ok(None)` means a well-formed command frame carrying a letter this
/// firmware does not know; those are ignored without comment so newer
/// hosts can talk to older boards.
pub fn classify(line: &[u8]) -> Result<Option<Frame>, FrameError> {
    if let Some(rest) = line.strip_prefix(COMMAND_PREFIX) {
        if rest.len() != 1 {
            return Err(FrameError::MalformedCommand);
        }
        return Ok(Command::from_byte(rest[0]).map(Frame::Command));
    }

    if let Some(at) = find_marker(line) {
        let payload = &line[..at];
        let declared =
            parse_u32(&line[at + CHECKSUM_MARKER.len()..]).ok_or(FrameError::ChecksumMismatch)?;
        if u32::from(line_checksum(payload)) != declared {
            return Err(FrameError::ChecksumMismatch);
        }
        let levels = parse_levels(payload)?;
        return Ok(Some(Frame::Feedback { levels, validated: true }));
    }

    let levels = parse_levels(line)?;
    Ok(Some(Frame::Feedback { levels, validated: false }))
}

fn find_marker(line: &[u8]) -> Option<usize> {
    line.windows(CHECKSUM_MARKER.len())
        .position(|window| window == CHECKSUM_MARKER)
}

fn parse_u32(digits: &[u8]) -> Option<u32> {
    core::str::from_utf8(digits).ok()?.parse().ok()
}

fn parse_levels(payload: &[u8]) -> Result<Feedback, FrameError> {
    let text = core::str::from_utf8(payload).map_err(|_| FrameError::BadPayload)?;
    let mut fields = text.split_ascii_whitespace();
    let first = fields
        .next()
        .and_then(|field| field.parse().ok())
        .ok_or(FrameError::BadPayload)?;
    let Some(second) = fields.next() else {
        return Ok(Feedback::Single(first));
    };
    let second = second.parse().map_err(|_| FrameError::BadPayload)?;
    if fields.next().is_some() {
        return Err(FrameError::BadPayload);
    }
    Ok(Feedback::Pair { temp: first, humi: second })
}
