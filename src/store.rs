//! The record store and sender selection.
//!
//! A [`RecordStore`] is the immutable, chronologically ordered result of
//! parsing one transcript. Analytics queries borrow it together with a
//! [`Selector`] naming whose messages to look at.
//!
//! # Example
//!
//! ```rust
//! use chatstat::parser::parse;
//! use chatstat::config::ParseConfig;
//! use chatstat::store::Selector;
//!
//! # fn main() -> chatstat::Result<()> {
//! let text = "1/2/23, 10:00 AM - Bob: Hi\n1/2/23, 10:01 AM - Alice: Hey\n1/2/23, 10:02 AM - Bob added Carol\n";
//! let store = parse(text, &ParseConfig::month_first())?;
//!
//! assert_eq!(store.senders(), vec!["Alice", "Bob"]);
//! assert_eq!(store.filter(&Selector::Overall).count(), 3);
//! assert_eq!(store.filter(&Selector::sender("Bob")).count(), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::parsing::TimestampFormat;
use crate::record::{MessageKind, MessageRecord};

/// Which records a query looks at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selector {
    /// Every record: user messages, media placeholders and notifications
    #[default]
    Overall,
    /// One sender's user messages and media placeholders
    Sender(String),
}

impl Selector {
    /// The label used for [`Selector::Overall`].
    pub const OVERALL: &'static str = "Overall";

    /// Selects a single sender.
    pub fn sender(name: impl Into<String>) -> Self {
        Selector::Sender(name.into())
    }

    /// Returns `true` for [`Selector::Overall`].
    pub fn is_overall(&self) -> bool {
        matches!(self, Selector::Overall)
    }

    /// Returns `true` if `record` falls under this selection.
    pub fn admits(&self, record: &MessageRecord) -> bool {
        match self {
            Selector::Overall => true,
            Selector::Sender(name) => record.sender_name() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Overall => f.write_str(Self::OVERALL),
            Selector::Sender(name) => f.write_str(name),
        }
    }
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::OVERALL {
            Ok(Selector::Overall)
        } else {
            Ok(Selector::sender(s))
        }
    }
}

/// Parsed records of one transcript, in chronological order.
///
/// The store has no mutating API; a new transcript always produces a new
/// store. It is `Send + Sync` and can be shared between concurrent queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<MessageRecord>,
    format: Option<TimestampFormat>,
    dropped: usize,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a store from already built records.
    ///
    /// Records are stable-sorted by timestamp, so records sharing a timestamp
    /// keep the given order.
    pub fn from_records(records: Vec<MessageRecord>) -> Self {
        Self::assemble(records, None, 0)
    }

    pub(crate) fn assemble(
        mut records: Vec<MessageRecord>,
        format: Option<TimestampFormat>,
        dropped: usize,
    ) -> Self {
        if !records.is_sorted_by_key(MessageRecord::timestamp) {
            records.sort_by_key(MessageRecord::timestamp);
        }
        Self {
            records,
            format,
            dropped,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the transcript produced no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in chronological order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Iterates all records in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }

    /// Iterates the records admitted by `selector`.
    pub fn filter<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = &'a MessageRecord> + Clone + 'a {
        self.records.iter().filter(move |r| selector.admits(r))
    }

    /// Number of records of the given kind.
    pub fn count_kind(&self, kind: MessageKind) -> usize {
        self.records.iter().filter(|r| r.kind() == kind).count()
    }

    /// The detected timestamp format family, if the transcript had one.
    pub fn format(&self) -> Option<TimestampFormat> {
        self.format
    }

    /// Number of logical units dropped as malformed during parsing.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Distinct participant names, sorted.
    pub fn senders(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(MessageRecord::sender_name)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `Overall` followed by one selector per participant.
    pub fn selector_options(&self) -> Vec<Selector> {
        std::iter::once(Selector::Overall)
            .chain(self.senders().into_iter().map(Selector::sender))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
