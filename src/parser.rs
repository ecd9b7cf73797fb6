//! Transcript parser: raw export text to a [`RecordStore`].
//!
//! Parsing runs in three steps:
//!
//! 1. The text is cut into logical units by [`Segments`].
//! 2. The first units are probed to pick one [`TimestampFormat`] family and
//!    to check the configured day/month order against the transcript.
//! 3. Every unit is parsed with that family. Units that don't conform are
//!    dropped with a warning; they never abort the parse.
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::ParseConfig;
//! use chatstat::parser::TranscriptParser;
//! use chatstat::record::MessageKind;
//!
//! # fn main() -> chatstat::Result<()> {
//! let parser = TranscriptParser::with_config(ParseConfig::month_first());
//! let store = parser.parse_str(
//!     "1/2/23, 10:00 AM - Alice: Hello\n\
//!      1/2/23, 10:05 AM - Bob: Hi Alice\n\
//!      1/2/23, 10:06 AM - Alice: <Media omitted>\n",
//! )?;
//!
//! assert_eq!(store.len(), 3);
//! assert_eq!(store.records()[2].kind(), MessageKind::MediaPlaceholder);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{DateOrder, ParseConfig};
use crate::error::{ChatstatError, Result};
use crate::parsing::{Entry, FormatMatcher, TimestampFormat, classify_entry, detect_format};
use crate::record::MessageRecord;
use crate::segment::Segments;
use crate::store::RecordStore;

/// Why a logical unit was left out of the store.
#[derive(Debug, Error)]
enum DropReason {
    #[error("does not match the {0} format")]
    FormatMismatch(TimestampFormat),

    #[error("date or time does not exist when read {0}")]
    InvalidInstant(DateOrder),
}

/// Parser for exported chat transcripts.
///
/// Holds only its [`ParseConfig`]; it is cheap to create and can be reused
/// for any number of transcripts.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParseConfig,
}

impl TranscriptParser {
    /// Creates a parser with default configuration (no day/month policy).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Reads and parses a UTF-8 transcript file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::Io`] if the file can't be read,
    /// [`ChatstatError::Utf8`] if it isn't UTF-8, and otherwise whatever
    /// [`parse_str`](Self::parse_str) returns.
    pub fn parse(&self, path: &Path) -> Result<RecordStore> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|source| ChatstatError::Utf8 {
            context: path.display().to_string(),
            source,
        })?;
        self.parse_str(&text)
    }

    /// Parses transcript text.
    ///
    /// Text without any timestamped line yields an empty store.
    ///
    /// # Errors
    ///
    /// - [`ChatstatError::AmbiguousDateOrder`] if the transcript uses `/` or
    ///   `-` dates and no day/month order is configured
    /// - [`ChatstatError::InconsistentDateOrder`] if the configured order
    ///   contradicts the transcript
    pub fn parse_str(&self, raw: &str) -> Result<RecordStore> {
        let raw = raw.strip_prefix('\u{FEFF}').unwrap_or(raw);
        let segments = Segments::new(raw);

        // A zero probe would read every transcript as empty.
        let probe_size = self.config.probe_size.max(1);
        let probe: Vec<&str> = segments.clone().take(probe_size).collect();
        if probe.is_empty() {
            debug!("transcript has no timestamped lines");
            return Ok(RecordStore::empty());
        }

        let Some(format) = detect_format(&probe) else {
            let mut dropped = 0;
            for (index, _) in segments.enumerate() {
                warn!(unit = index, "dropping malformed line: no known timestamp format");
                dropped += 1;
            }
            return Ok(RecordStore::assemble(Vec::new(), None, dropped));
        };

        let order = self.resolve_order(format, &probe)?;
        debug!(%format, %order, "detected transcript format");

        let matcher = FormatMatcher::for_format(format);
        let mut records = Vec::new();
        let mut dropped = 0;

        for (index, unit) in segments.enumerate() {
            match build_record(matcher, order, unit) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!(unit = index, %reason, "dropping malformed line");
                    dropped += 1;
                }
            }
        }

        if !records.is_sorted_by_key(MessageRecord::timestamp) {
            warn!("records are out of chronological order, sorting by timestamp");
        }

        debug!(records = records.len(), dropped, "parsed transcript");
        Ok(RecordStore::assemble(records, Some(format), dropped))
    }

    /// Settles the day/month order for `format` and checks it against the
    /// probed units.
    fn resolve_order(&self, format: TimestampFormat, probe: &[&str]) -> Result<DateOrder> {
        let order = match (format.is_day_first_only(), self.config.date_order) {
            (true, None | Some(DateOrder::DayFirst)) => DateOrder::DayFirst,
            (true, Some(order)) => {
                return Err(ChatstatError::inconsistent_date_order(
                    order,
                    format,
                    "dotted dates are always day-first",
                ));
            }
            (false, None) => return Err(ChatstatError::ambiguous_date_order(format)),
            (false, Some(order)) => order,
        };

        let matcher = FormatMatcher::for_format(format);
        for unit in probe {
            let Some(raw) = matcher.captures(unit) else {
                continue;
            };
            if raw.resolve(order).is_none() && raw.resolve(order.opposite()).is_some() {
                let line = unit.lines().next().unwrap_or(unit);
                return Err(ChatstatError::inconsistent_date_order(
                    order,
                    format,
                    format!("'{line}' is only valid {}", order.opposite()),
                ));
            }
        }

        Ok(order)
    }
}

fn build_record(
    matcher: &FormatMatcher,
    order: DateOrder,
    unit: &str,
) -> std::result::Result<MessageRecord, DropReason> {
    let raw = matcher
        .captures(unit)
        .ok_or(DropReason::FormatMismatch(matcher.format()))?;
    let timestamp = raw
        .resolve(order)
        .ok_or(DropReason::InvalidInstant(order))?;

    let record = match classify_entry(raw.rest) {
        Entry::User { sender, body } => {
            MessageRecord::user(timestamp, sender, body.replace("\r\n", "\n"))
        }
        Entry::System { text } => MessageRecord::system(timestamp, text.replace("\r\n", "\n")),
    };
    Ok(record)
}

/// Parses `raw` with `config`.
///
/// Shorthand for `TranscriptParser::with_config(config.clone()).parse_str(raw)`.
///
/// # Errors
///
/// See [`TranscriptParser::parse_str`].
pub fn parse(raw: &str, config: &ParseConfig) -> Result<RecordStore> {
    TranscriptParser::with_config(config.clone()).parse_str(raw)
}
