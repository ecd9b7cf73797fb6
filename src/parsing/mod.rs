//! Building blocks of the record parser.
//!
//! - [`format`] recognizes the timestamp prefix families and resolves dates
//! - [`entry`] splits what follows the timestamp into sender and body
//!
//! [`TranscriptParser`](crate::parser::TranscriptParser) ties them together.

pub mod entry;
pub mod format;

pub use entry::{Entry, classify_entry};
pub use format::{
    Clock, DateSeparator, FormatMatcher, Framing, Meridiem, RawTimestamp, TimestampFormat,
    detect_format, timestamp_head,
};
