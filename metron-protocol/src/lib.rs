//! Host Serial Protocol
//!
//! This crate defines the line-oriented UART protocol between the Metron
//! controller and its supervising host. Both directions carry ASCII lines
//! terminated by CR/LF; there is no binary framing and no session state.
//!
//! # Protocol Overview
//!
//! Inbound (host to controller):
//! ```text
//! CMD:<c>\r\n                command frame, one command character
//! <a> <b> CHECKSUM:<n>\r\n   checksum-guarded feedback levels
//! <a> <b>\r\n                legacy feedback levels, taken on trust
//! ```
//!
//! Outbound (controller to host):
//! ```text
//! T:<t> H:<h> CHECKSUM:<n>\r\n   temperature/humidity sample report
//! FREQ:<f> CHECKSUM:<n>\r\n      frequency sample report
//! <free text>\r\n                diagnostics
//! ```
//!
//! The checksum is the wrapping u8 sum of every byte before the
//! ` CHECKSUM:` marker, printed in decimal.

#![no_std]
#![deny(unsafe_code)]

pub mod checksum;
pub mod command;
pub mod frame;
pub mod line;
pub mod report;

pub use checksum::line_checksum;
pub use command::{AlarmId, Command};
pub use frame::{classify, Feedback, Frame, FrameError, CHECKSUM_MARKER, COMMAND_PREFIX};
pub use line::{Line, LineAssembler, MAX_LINE_LEN};
pub use report::{diagnostic, frequency_report, temp_humi_report, ReportLine, MAX_REPORT_LEN};
