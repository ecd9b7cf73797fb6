//! # Chatstat
//!
//! A Rust library for turning WhatsApp chat exports into structured message
//! records and computing activity statistics over them.
//!
//! ## Overview
//!
//! An exported transcript is a text file where every message starts with a
//! timestamp prefix, continuation lines belong to the message above, and
//! group notifications carry no sender. Chatstat:
//!
//! - detects which of the twelve timestamp layouts the export uses
//!   (12/24-hour clock, bracketed iOS style or dashed Android style, and
//!   slashed, dashed or dotted dates)
//! - resolves the day/month order, refusing to guess when it is ambiguous
//! - parses every message into a [`MessageRecord`] with calendar fields
//! - answers aggregate queries for the whole chat or one participant
//! - serializes the statistics as a JSON report
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = TranscriptParser::with_config(ParseConfig::day_first());
//!     let store = parser.parse("WhatsApp Chat.txt".as_ref())?;
//!
//!     let analyzer = Analyzer::new(&store);
//!     let counts = analyzer.basic_counts(&Selector::Overall);
//!     println!("{} messages, {} links", counts.messages, counts.links);
//!
//!     for share in analyzer.most_active_users().shares {
//!         println!("{}: {:.2}%", share.sender, share.percent);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`segment`]: splits raw text into message units
//! - [`parsing`]: timestamp layouts, format detection and entry classification
//! - [`parser`]: [`TranscriptParser`] and [`parse()`], text to [`RecordStore`]
//! - [`record`]: [`MessageRecord`], [`Sender`], [`MessageKind`], calendar fields
//! - [`store`]: [`RecordStore`] and [`Selector`]
//! - [`analytics`]: the aggregate queries, [`Analyzer`](analytics::Analyzer)
//!   and [`Report`](analytics::Report)
//! - [`config`]: [`ParseConfig`], [`AnalyticsConfig`], [`StopWords`]
//! - [`output`]: JSON report serialization
//! - [`cli`]: command-line arguments (feature `cli`)
//! - [`error`]: [`ChatstatError`] and [`Result`]
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `json-output` | JSON report output | `serde_json` |
//! | `cli` | `chatstat` binary | `clap`, `tracing-subscriber` |
//! | `gen-test` | `gen_test` transcript generator | `rand` |
//! | `full` | Everything except `gen-test` (default) | all above |

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod parsing;
pub mod record;
pub mod segment;
pub mod store;

// Re-export the main types at the crate root for convenience
pub use analytics::query;
pub use config::{AnalyticsConfig, DateOrder, ParseConfig, StopWords};
pub use error::{ChatstatError, Result};
pub use parser::{TranscriptParser, parse};
pub use record::{MessageKind, MessageRecord, Sender};
pub use store::{RecordStore, Selector};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    // Records and the store
    pub use crate::record::{Calendar, MessageKind, MessageRecord, Period, Sender};
    pub use crate::store::{RecordStore, Selector};

    // Error types
    pub use crate::error::{ChatstatError, Result};

    // Parsing
    pub use crate::parser::{TranscriptParser, parse};
    pub use crate::parsing::TimestampFormat;

    // Configuration
    pub use crate::config::{AnalyticsConfig, DateOrder, ParseConfig, StopWords};

    // Analytics
    pub use crate::analytics::{AggregateResult, Analyzer, Query, Report, query};

    // Report output
    #[cfg(feature = "json-output")]
    pub use crate::output::{report_to_json, write_report};
}
