//! Outbound report formatting.
//!
//! Sample reports carry the same ` CHECKSUM:` guard the host uses for
//! feedback, computed over the body bytes before the marker. Diagnostics
//! are free text with no guard; hosts treat any line without the marker
//! as human-readable.

use core::fmt::Write;

use heapless::String;

use crate::checksum::line_checksum;

/// Longest outbound line, terminator included.
pub const MAX_REPORT_LEN: usize = 48;

/// One CRLF-terminated line ready for the serial link.
pub type ReportLine = String<MAX_REPORT_LEN>;

/// Format a temperature/humidity sample report.
pub fn temp_humi_report(temp: u8, humi: u8) -> ReportLine {
    let mut body: String<24> = String::new();
    let _ = write!(body, "T:{} H:{}", temp, humi);
    finish(&body)
}

/// Format a frequency sample report.
pub fn frequency_report(freq: u32) -> ReportLine {
    let mut body: String<24> = String::new();
    let _ = write!(body, "FREQ:{}", freq);
    finish(&body)
}

/// Format a free-text diagnostic line.
pub fn diagnostic(text: &str) -> ReportLine {
    let mut line = ReportLine::new();
    let _ = write!(line, "{}\r\n", text);
    line
}

fn finish(body: &str) -> ReportLine {
    let mut line = ReportLine::new();
    let _ = write!(line, "{} CHECKSUM:{}\r\n", body, line_checksum(body.as_bytes()));
    line
}
