//! Serial line assembly.
//!
//! Inbound bytes accumulate one at a time into a bounded buffer until a CR
//! or LF arrives. The terminator of a CRLF pair then lands on an empty
//! buffer and yields nothing, so both bare-CR and CRLF hosts work without
//! configuration.

use heapless::Vec;

/// Maximum line length in bytes, terminator excluded.
///
/// Long enough for every frame the host sends (`CMD:` frames and two
/// feedback levels with a checksum suffix); anything longer is garbage.
pub const MAX_LINE_LEN: usize = 24;

/// A completed inbound line, terminator stripped.
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Byte-fed accumulator for CR/LF-terminated lines.
///
/// Overflow silently drops the partial line and restarts from an empty
/// buffer; the overflowing byte is discarded with it. The buffer is also
/// cleared after every completed line, so one assembler serves the link
/// for the lifetime of the firmware.
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Line,
}

impl LineAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed a single byte.
    ///
    /// Returns `Some(line)` when the byte completes a non-empty line,
    /// `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        match byte {
            b'\r' | b'\n' => {
                if self.buffer.is_empty() {
                    None
                } else {
                    let line = self.buffer.clone();
                    self.buffer.clear();
                    Some(line)
                }
            }
            _ => {
                if self.buffer.push(byte).is_err() {
                    // Oversized line: drop it and start over.
                    self.buffer.clear();
                }
                None
            }
        }
    }

    /// Drop any partially accumulated line.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
