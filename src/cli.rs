//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`]: CLI argument structure (for use with clap)
//! - [`init_tracing`]: stderr logging for the binary
//!
//! The argument helpers turn flags into the library's configuration values,
//! so the binary holds no parsing or analytics logic of its own.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{AnalyticsConfig, DateOrder, ParseConfig, StopWords};
use crate::error::Result;
use crate::store::Selector;

/// Analyze an exported WhatsApp chat: message counts, timelines, the most
/// active participants, an hourly heatmap, common words and emoji.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("date_order").args(["day_first", "month_first"])))]
#[command(after_help = "EXAMPLES:
    chatstat chat.txt --month-first
    chatstat chat.txt --day-first --user Alice
    chatstat chat.txt --month-first --json > report.json
    chatstat chat.txt --day-first --stop-words stop_hinglish.txt --top-words 30
    chatstat chat.txt --month-first --output report.json")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Analyze a single participant instead of the whole chat
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Dates are written day first (15/01/24)
    #[arg(long)]
    pub day_first: bool,

    /// Dates are written month first (1/15/24)
    #[arg(long)]
    pub month_first: bool,

    /// Whitespace-separated stop-word list for the common-words ranking
    #[arg(long, value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    /// Number of entries in the common-words ranking (0 = all)
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub top_words: usize,

    /// Number of participants in the share table
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub top_users: usize,

    /// Print the full report as JSON instead of a text summary
    #[arg(long)]
    pub json: bool,

    /// Also save the JSON report to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Log parsing details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The day/month policy selected by the flags, if any.
    pub fn date_order(&self) -> Option<DateOrder> {
        if self.day_first {
            Some(DateOrder::DayFirst)
        } else if self.month_first {
            Some(DateOrder::MonthFirst)
        } else {
            None
        }
    }

    /// Builds the parser configuration.
    pub fn parse_config(&self) -> ParseConfig {
        match self.date_order() {
            Some(order) => ParseConfig::new().with_date_order(order),
            None => ParseConfig::new(),
        }
    }

    /// Builds the analytics configuration, loading the stop-word file.
    pub fn analytics_config(&self) -> Result<AnalyticsConfig> {
        let stop_words = match &self.stop_words {
            Some(path) => StopWords::load(path)?,
            None => StopWords::new(),
        };
        Ok(AnalyticsConfig::new()
            .with_stop_words(stop_words)
            .with_top_words(self.top_words)
            .with_top_users(self.top_users))
    }

    /// The selection to analyze.
    pub fn selector(&self) -> Selector {
        self.user
            .as_deref()
            .map_or(Selector::Overall, |name| name.parse().unwrap_or_default())
    }
}

/// Installs a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output with `verbose`.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "chatstat=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatstat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["chat.txt"]);
        assert_eq!(args.input, PathBuf::from("chat.txt"));
        assert_eq!(args.date_order(), None);
        assert_eq!(args.selector(), Selector::Overall);
        assert_eq!(args.top_words, 20);
        assert_eq!(args.top_users, 5);
        assert!(!args.json);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_date_order_flags() {
        assert_eq!(
            parse(&["chat.txt", "--day-first"]).parse_config().date_order,
            Some(DateOrder::DayFirst)
        );
        assert_eq!(
            parse(&["chat.txt", "--month-first"]).date_order(),
            Some(DateOrder::MonthFirst)
        );
        assert!(
            Args::try_parse_from(["chatstat", "chat.txt", "--day-first", "--month-first"])
                .is_err()
        );
    }

    #[test]
    fn test_user_selector() {
        let args = parse(&["chat.txt", "--user", "Alice"]);
        assert_eq!(args.selector(), Selector::sender("Alice"));
        let overall = parse(&["chat.txt", "-u", "Overall"]);
        assert_eq!(overall.selector(), Selector::Overall);
    }

    #[test]
    fn test_analytics_config() {
        let args = parse(&["chat.txt", "--top-words", "0", "--top-users", "3"]);
        let config = args.analytics_config().unwrap();
        assert_eq!(config.top_words, 0);
        assert_eq!(config.top_users, 3);
        assert!(config.stop_words.is_empty());

        let missing = parse(&["chat.txt", "--stop-words", "/no/such/file.txt"]);
        assert!(missing.analytics_config().unwrap_err().is_io());
    }

    #[test]
    fn test_output_flag() {
        let args = parse(&["chat.txt", "--month-first", "-o", "report.json"]);
        assert_eq!(args.output, Some(PathBuf::from("report.json")));
        assert!(Args::try_parse_from(["chatstat", "chat.txt", "--export", "out.csv"]).is_err());
    }
}
