//! Unified error types for chatstat.
//!
//! This module provides a single [`ChatstatError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Structural problems** (unreadable input, an unset or contradictory
//!   day/month policy) are returned to the caller as typed errors
//! - **Line-level problems** (a stray malformed line) never surface here; the
//!   parser drops the line, logs a warning and keeps going
//! - **Empty input** is not an error at all: it yields an empty
//!   [`RecordStore`](crate::store::RecordStore)

use std::io;

use thiserror::Error;

use crate::config::DateOrder;
use crate::parsing::TimestampFormat;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::store::RecordStore;
///
/// fn load() -> Result<RecordStore> {
///     Ok(RecordStore::empty())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// An I/O error occurred while reading a transcript or writing a report.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript's dates are ambiguous and no day/month policy was set.
    ///
    /// Exports with `/` or `-` date separators are written day-first in some
    /// locales and month-first in others; the order must be configured via
    /// [`ParseConfig::with_date_order`](crate::config::ParseConfig::with_date_order).
    #[error(
        "Ambiguous dates in {format} transcript: configure a date order (day-first or month-first)"
    )]
    AmbiguousDateOrder {
        /// The detected timestamp format family
        format: TimestampFormat,
    },

    /// The configured day/month policy contradicts the transcript.
    ///
    /// Raised when the format family fixes the order (dotted dates are always
    /// day-first) or when a probed line only makes sense with the other order.
    #[error("Date order '{order}' is inconsistent with the {format} transcript: {detail}")]
    InconsistentDateOrder {
        /// The configured order
        order: DateOrder,
        /// The detected timestamp format family
        format: TimestampFormat,
        /// What contradicted the order (a sample line or a rule)
        detail: String,
    },

    /// An `Overall`-only query was requested for a single sender.
    #[error("Query '{query}' is only available for the Overall selection")]
    OverallOnly {
        /// Name of the offending query
        query: &'static str,
    },

    /// The transcript was not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Report serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatError {
    /// Creates an ambiguous date order error.
    pub fn ambiguous_date_order(format: TimestampFormat) -> Self {
        ChatstatError::AmbiguousDateOrder { format }
    }

    /// Creates an inconsistent date order error.
    pub fn inconsistent_date_order(
        order: DateOrder,
        format: TimestampFormat,
        detail: impl Into<String>,
    ) -> Self {
        ChatstatError::InconsistentDateOrder {
            order,
            format,
            detail: detail.into(),
        }
    }

    /// Creates an error for an `Overall`-only query used with a sender.
    pub fn overall_only(query: &'static str) -> Self {
        ChatstatError::OverallOnly { query }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatError::Io(_))
    }

    /// Returns `true` if the date order configuration is missing or wrong.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ChatstatError::AmbiguousDateOrder { .. } | ChatstatError::InconsistentDateOrder { .. }
        )
    }

    /// Returns `true` if an `Overall`-only query was misused.
    pub fn is_overall_only(&self) -> bool {
        matches!(self, ChatstatError::OverallOnly { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
