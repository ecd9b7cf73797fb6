//! Configuration types for parsing and analytics.
//!
//! Everything that the engines would otherwise read from process-wide state
//! (the day/month policy, the stop-word list, ranking sizes) is an explicit
//! value here, threaded into [`TranscriptParser`](crate::parser::TranscriptParser)
//! and [`Analyzer`](crate::analytics::Analyzer).
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::{AnalyticsConfig, DateOrder, ParseConfig, StopWords};
//!
//! let parse = ParseConfig::new().with_date_order(DateOrder::DayFirst);
//!
//! let analytics = AnalyticsConfig::new()
//!     .with_stop_words(StopWords::from_text("the a an\nand"))
//!     .with_top_words(10);
//!
//! assert_eq!(parse.date_order, Some(DateOrder::DayFirst));
//! assert!(analytics.stop_words.contains("and"));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How to read the two leading date components of an ambiguous date.
///
/// `03/04/2023` is the 3rd of April under [`DayFirst`](DateOrder::DayFirst)
/// and the 4th of March under [`MonthFirst`](DateOrder::MonthFirst). One
/// order is applied to the whole transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `DD/MM/YY` (most of Europe, Asia, Latin America)
    DayFirst,
    /// `MM/DD/YY` (United States)
    MonthFirst,
}

impl DateOrder {
    /// Returns the other order.
    pub fn opposite(self) -> Self {
        match self {
            DateOrder::DayFirst => DateOrder::MonthFirst,
            DateOrder::MonthFirst => DateOrder::DayFirst,
        }
    }

    /// Maps the first and second date components to `(day, month)`.
    pub fn arrange(self, first: u32, second: u32) -> (u32, u32) {
        match self {
            DateOrder::DayFirst => (first, second),
            DateOrder::MonthFirst => (second, first),
        }
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::DayFirst => write!(f, "day-first"),
            DateOrder::MonthFirst => write!(f, "month-first"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day-first" | "dayfirst" | "dmy" => Ok(DateOrder::DayFirst),
            "month-first" | "monthfirst" | "mdy" => Ok(DateOrder::MonthFirst),
            _ => Err(format!(
                "Unknown date order: '{}'. Expected one of: day-first, month-first",
                s
            )),
        }
    }
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatstat::config::{DateOrder, ParseConfig};
///
/// let config = ParseConfig::month_first().with_probe_size(50);
/// assert_eq!(config.date_order, Some(DateOrder::MonthFirst));
/// assert_eq!(config.probe_size, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Day/month policy (default: unset).
    ///
    /// Unset is only accepted for dotted dates, which are always day-first.
    pub date_order: Option<DateOrder>,

    /// Number of leading logical units used to detect the format family
    /// (default: 20, values below 1 are read as 1)
    pub probe_size: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            date_order: None,
            probe_size: 20,
        }
    }
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for day-first transcripts.
    pub fn day_first() -> Self {
        Self::new().with_date_order(DateOrder::DayFirst)
    }

    /// Creates a configuration for month-first transcripts.
    pub fn month_first() -> Self {
        Self::new().with_date_order(DateOrder::MonthFirst)
    }

    /// Sets the day/month policy.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = Some(order);
        self
    }

    /// Sets the number of units probed for format detection (at least 1).
    #[must_use]
    pub fn with_probe_size(mut self, size: usize) -> Self {
        self.probe_size = size.max(1);
        self
    }
}

/// A set of lowercase words excluded from word frequency rankings.
///
/// # Example
///
/// ```rust
/// use chatstat::config::StopWords;
///
/// let words = StopWords::from_text("Hai\nhe  THE\n\nto");
/// assert_eq!(words.len(), 4);
/// assert!(words.contains("the"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopWords(BTreeSet<String>);

impl StopWords {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whitespace or newline separated word list.
    pub fn from_text(text: &str) -> Self {
        text.split_whitespace().collect()
    }

    /// Reads a word list from a UTF-8 text file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// A small built-in list of common English function words.
    pub fn english() -> Self {
        ENGLISH_STOP_WORDS.iter().copied().collect()
    }

    /// Adds a word (stored lowercase).
    pub fn insert(&mut self, word: &str) -> bool {
        self.0.insert(word.to_lowercase())
    }

    /// Returns `true` if `word` (already lowercase) is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the words in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for StopWords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut words = Self::new();
        for word in iter {
            words.insert(word);
        }
        words
    }
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "but", "by", "can", "did", "do", "does", "for", "from", "had", "has",
    "have", "he", "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just",
    "me", "my", "no", "not", "of", "on", "or", "our", "she", "so", "than", "that", "the",
    "their", "them", "then", "there", "they", "this", "to", "too", "up", "us", "was", "we",
    "were", "what", "when", "where", "which", "who", "will", "with", "you", "your",
];

/// Configuration for the analytics engine.
///
/// # Example
///
/// ```rust
/// use chatstat::config::{AnalyticsConfig, StopWords};
///
/// let config = AnalyticsConfig::new()
///     .with_stop_words(StopWords::english())
///     .with_top_users(3);
///
/// assert_eq!(config.top_users, 3);
/// assert_eq!(config.top_words, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Words removed from the common-words ranking (default: empty)
    #[serde(default)]
    pub stop_words: StopWords,

    /// Number of senders in the percentage-share table (default: 5)
    pub top_users: usize,

    /// Length of the common-words ranking, `0` for unlimited (default: 20)
    pub top_words: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWords::new(),
            top_users: 5,
            top_words: 20,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stop-word list.
    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Sets the size of the percentage-share table.
    #[must_use]
    pub fn with_top_users(mut self, count: usize) -> Self {
        self.top_users = count;
        self
    }

    /// Sets the length of the common-words ranking (`0` = unlimited).
    #[must_use]
    pub fn with_top_words(mut self, count: usize) -> Self {
        self.top_words = count;
        self
    }
}
