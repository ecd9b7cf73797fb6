//! Report serialization for presentation layers.
//!
//! - [`write_report`] / [`report_to_json`]: a full
//!   [`Report`](crate::analytics::Report) as pretty JSON, needs the
//!   `json-output` feature
//!
//! Only computed statistics leave the library this way; parsed records stay
//! in memory.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatstat::Result<()> {
//! use chatstat::analytics::Analyzer;
//! use chatstat::config::ParseConfig;
//! use chatstat::output::report_to_json;
//! use chatstat::parser::parse;
//! use chatstat::store::Selector;
//!
//! let store = parse("1/2/23, 10:00 AM - Alice: Hello\n", &ParseConfig::month_first())?;
//! let json = report_to_json(&Analyzer::new(&store).report(&Selector::Overall))?;
//!
//! assert!(json.contains("\"selection\": \"Overall\""));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "json-output")]
pub use json_writer::{report_to_json, write_report};
