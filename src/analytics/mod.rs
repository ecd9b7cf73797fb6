//! Analytics engine: aggregate queries over a [`RecordStore`].
//!
//! Every query is a pure function of the store, a [`Selector`] and an
//! [`AnalyticsConfig`]; running it twice gives identical results.
//!
//! | Query | Function | Result |
//! |-------|----------|--------|
//! | Basic counts | [`basic_counts`] | [`BasicCounts`] |
//! | Monthly timeline | [`monthly_timeline`] | `Vec<`[`MonthlyCount`]`>` |
//! | Daily timeline | [`daily_timeline`] | `Vec<`[`DailyCount`]`>` |
//! | Most active users | [`most_active_users`] | [`UserRanking`] |
//! | Weekly heatmap | [`activity_heatmap`] | [`Heatmap`] |
//! | Common words | [`common_words`] | `Vec<`[`TokenCount`]`>` |
//! | Emoji | [`emoji_frequencies`] | `Vec<`[`EmojiCount`]`>` |
//! | Busiest weekdays | [`weekday_activity`] | `Vec<`[`WeekdayCount`]`>` |
//! | Busiest months | [`month_activity`] | `Vec<`[`MonthActivity`]`>` |
//!
//! [`most_active_users`] compares participants, so it takes no selector and
//! always covers the whole transcript. The dynamic [`query`] entry point
//! rejects it for a single sender with [`ChatstatError::OverallOnly`].
//!
//! # Example
//!
//! ```rust
//! use chatstat::analytics::Analyzer;
//! use chatstat::config::ParseConfig;
//! use chatstat::parser::parse;
//! use chatstat::store::Selector;
//!
//! # fn main() -> chatstat::Result<()> {
//! let store = parse(
//!     "1/2/23, 10:00 AM - Alice: Hello\n\
//!      1/2/23, 10:05 AM - Bob: Hi Alice\n\
//!      1/2/23, 10:06 AM - Alice: <Media omitted>\n",
//!     &ParseConfig::month_first(),
//! )?;
//!
//! let analyzer = Analyzer::new(&store);
//! let counts = analyzer.basic_counts(&Selector::Overall);
//! assert_eq!((counts.messages, counts.media, counts.links), (3, 1, 0));
//!
//! let ranking = analyzer.most_active_users();
//! assert_eq!(ranking.counts[0].sender, "Alice");
//! # Ok(())
//! # }
//! ```

mod emoji;
mod heatmap;
mod stats;
mod timeline;
mod users;
mod words;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use emoji::{EmojiCount, emoji_frequencies, extract_emoji};
pub use heatmap::{Heatmap, activity_heatmap};
pub use stats::{BasicCounts, basic_counts, count_links};
pub use timeline::{
    DailyCount, MonthActivity, MonthlyCount, WeekdayCount, daily_timeline, month_activity,
    monthly_timeline, weekday_activity,
};
pub use users::{UserCount, UserRanking, UserShare, most_active_users};
pub use words::{TokenCount, common_words, tokenize};

use crate::config::AnalyticsConfig;
use crate::error::{ChatstatError, Result};
use crate::store::{RecordStore, Selector};

/// Names of the available queries, for dynamic dispatch through [`query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    /// [`basic_counts`]
    BasicCounts,
    /// [`monthly_timeline`]
    MonthlyTimeline,
    /// [`daily_timeline`]
    DailyTimeline,
    /// [`most_active_users`], `Overall` only
    MostActiveUsers,
    /// [`activity_heatmap`]
    ActivityHeatmap,
    /// [`common_words`]
    CommonWords,
    /// [`emoji_frequencies`]
    EmojiFrequencies,
    /// [`weekday_activity`]
    WeekdayActivity,
    /// [`month_activity`]
    MonthActivity,
}

impl Query {
    /// Returns all queries.
    pub fn all() -> &'static [Query] {
        &[
            Query::BasicCounts,
            Query::MonthlyTimeline,
            Query::DailyTimeline,
            Query::MostActiveUsers,
            Query::ActivityHeatmap,
            Query::CommonWords,
            Query::EmojiFrequencies,
            Query::WeekdayActivity,
            Query::MonthActivity,
        ]
    }

    /// Snake-case name of the query.
    pub fn name(self) -> &'static str {
        match self {
            Query::BasicCounts => "basic_counts",
            Query::MonthlyTimeline => "monthly_timeline",
            Query::DailyTimeline => "daily_timeline",
            Query::MostActiveUsers => "most_active_users",
            Query::ActivityHeatmap => "activity_heatmap",
            Query::CommonWords => "common_words",
            Query::EmojiFrequencies => "emoji_frequencies",
            Query::WeekdayActivity => "weekday_activity",
            Query::MonthActivity => "month_activity",
        }
    }

    /// Returns `true` if the query is only defined for [`Selector::Overall`].
    pub fn is_overall_only(self) -> bool {
        matches!(self, Query::MostActiveUsers)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Query {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('-', "_");
        Query::all()
            .iter()
            .copied()
            .find(|q| q.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Query::all().iter().map(|q| q.name()).collect();
                format!(
                    "Unknown query: '{}'. Expected one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

/// Result of a dynamically dispatched [`query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "query", content = "result", rename_all = "snake_case")]
pub enum AggregateResult {
    /// See [`basic_counts`]
    BasicCounts(BasicCounts),
    /// See [`monthly_timeline`]
    MonthlyTimeline(Vec<MonthlyCount>),
    /// See [`daily_timeline`]
    DailyTimeline(Vec<DailyCount>),
    /// See [`most_active_users`]
    MostActiveUsers(UserRanking),
    /// See [`activity_heatmap`]
    ActivityHeatmap(Heatmap),
    /// See [`common_words`]
    CommonWords(Vec<TokenCount>),
    /// See [`emoji_frequencies`]
    EmojiFrequencies(Vec<EmojiCount>),
    /// See [`weekday_activity`]
    WeekdayActivity(Vec<WeekdayCount>),
    /// See [`month_activity`]
    MonthActivity(Vec<MonthActivity>),
}

impl AggregateResult {
    /// The query that produced this result.
    pub fn query(&self) -> Query {
        match self {
            AggregateResult::BasicCounts(_) => Query::BasicCounts,
            AggregateResult::MonthlyTimeline(_) => Query::MonthlyTimeline,
            AggregateResult::DailyTimeline(_) => Query::DailyTimeline,
            AggregateResult::MostActiveUsers(_) => Query::MostActiveUsers,
            AggregateResult::ActivityHeatmap(_) => Query::ActivityHeatmap,
            AggregateResult::CommonWords(_) => Query::CommonWords,
            AggregateResult::EmojiFrequencies(_) => Query::EmojiFrequencies,
            AggregateResult::WeekdayActivity(_) => Query::WeekdayActivity,
            AggregateResult::MonthActivity(_) => Query::MonthActivity,
        }
    }
}

/// Runs `query` for `selector`.
///
/// # Errors
///
/// Returns [`ChatstatError::OverallOnly`] if an `Overall`-only query is asked
/// for a single sender.
///
/// # Example
///
/// ```rust
/// use chatstat::analytics::{Query, query};
/// use chatstat::config::AnalyticsConfig;
/// use chatstat::store::{RecordStore, Selector};
///
/// let store = RecordStore::empty();
/// let config = AnalyticsConfig::default();
///
/// assert!(query(&store, &Selector::Overall, Query::MostActiveUsers, &config).is_ok());
///
/// let err = query(&store, &Selector::sender("Alice"), Query::MostActiveUsers, &config)
///     .unwrap_err();
/// assert!(err.is_overall_only());
/// ```
pub fn query(
    store: &RecordStore,
    selector: &Selector,
    query: Query,
    config: &AnalyticsConfig,
) -> Result<AggregateResult> {
    if query.is_overall_only() && !selector.is_overall() {
        return Err(ChatstatError::overall_only(query.name()));
    }

    let result = match query {
        Query::BasicCounts => AggregateResult::BasicCounts(basic_counts(store, selector)),
        Query::MonthlyTimeline => {
            AggregateResult::MonthlyTimeline(monthly_timeline(store, selector))
        }
        Query::DailyTimeline => AggregateResult::DailyTimeline(daily_timeline(store, selector)),
        Query::MostActiveUsers => {
            AggregateResult::MostActiveUsers(most_active_users(store, config))
        }
        Query::ActivityHeatmap => {
            AggregateResult::ActivityHeatmap(activity_heatmap(store, selector))
        }
        Query::CommonWords => {
            AggregateResult::CommonWords(common_words(store, selector, config))
        }
        Query::EmojiFrequencies => {
            AggregateResult::EmojiFrequencies(emoji_frequencies(store, selector))
        }
        Query::WeekdayActivity => {
            AggregateResult::WeekdayActivity(weekday_activity(store, selector))
        }
        Query::MonthActivity => AggregateResult::MonthActivity(month_activity(store, selector)),
    };
    Ok(result)
}

/// Every query's result for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// `"Overall"` or the participant name
    pub selection: String,
    /// Headline numbers
    pub basic_counts: BasicCounts,
    /// Records per month
    pub monthly_timeline: Vec<MonthlyCount>,
    /// Records per date
    pub daily_timeline: Vec<DailyCount>,
    /// Participant ranking; `None` for a single-sender report
    pub most_active_users: Option<UserRanking>,
    /// Weekday by hour grid
    pub activity_heatmap: Heatmap,
    /// Most used words
    pub common_words: Vec<TokenCount>,
    /// Most used emoji
    pub emoji_frequencies: Vec<EmojiCount>,
    /// Records per weekday
    pub weekday_activity: Vec<WeekdayCount>,
    /// Records per month of the year
    pub month_activity: Vec<MonthActivity>,
}

/// Runs queries against one store with one configuration.
#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    store: &'a RecordStore,
    config: AnalyticsConfig,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer with the default configuration.
    pub fn new(store: &'a RecordStore) -> Self {
        Self::with_config(store, AnalyticsConfig::default())
    }

    /// Creates an analyzer with a custom configuration.
    pub fn with_config(store: &'a RecordStore, config: AnalyticsConfig) -> Self {
        Self { store, config }
    }

    /// Returns the store being analyzed.
    pub fn store(&self) -> &'a RecordStore {
        self.store
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// See [`basic_counts`].
    pub fn basic_counts(&self, selector: &Selector) -> BasicCounts {
        basic_counts(self.store, selector)
    }

    /// See [`monthly_timeline`].
    pub fn monthly_timeline(&self, selector: &Selector) -> Vec<MonthlyCount> {
        monthly_timeline(self.store, selector)
    }

    /// See [`daily_timeline`].
    pub fn daily_timeline(&self, selector: &Selector) -> Vec<DailyCount> {
        daily_timeline(self.store, selector)
    }

    /// See [`most_active_users`].
    pub fn most_active_users(&self) -> UserRanking {
        most_active_users(self.store, &self.config)
    }

    /// See [`activity_heatmap`].
    pub fn activity_heatmap(&self, selector: &Selector) -> Heatmap {
        activity_heatmap(self.store, selector)
    }

    /// See [`common_words`].
    pub fn common_words(&self, selector: &Selector) -> Vec<TokenCount> {
        common_words(self.store, selector, &self.config)
    }

    /// See [`emoji_frequencies`].
    pub fn emoji_frequencies(&self, selector: &Selector) -> Vec<EmojiCount> {
        emoji_frequencies(self.store, selector)
    }

    /// See [`weekday_activity`].
    pub fn weekday_activity(&self, selector: &Selector) -> Vec<WeekdayCount> {
        weekday_activity(self.store, selector)
    }

    /// See [`month_activity`].
    pub fn month_activity(&self, selector: &Selector) -> Vec<MonthActivity> {
        month_activity(self.store, selector)
    }

    /// See [`query`].
    pub fn query(&self, selector: &Selector, query: Query) -> Result<AggregateResult> {
        self::query(self.store, selector, query, &self.config)
    }

    /// Runs every query for `selector`.
    pub fn report(&self, selector: &Selector) -> Report {
        Report {
            selection: selector.to_string(),
            basic_counts: self.basic_counts(selector),
            monthly_timeline: self.monthly_timeline(selector),
            daily_timeline: self.daily_timeline(selector),
            most_active_users: selector.is_overall().then(|| self.most_active_users()),
            activity_heatmap: self.activity_heatmap(selector),
            common_words: self.common_words(selector),
            emoji_frequencies: self.emoji_frequencies(selector),
            weekday_activity: self.weekday_activity(selector),
            month_activity: self.month_activity(selector),
        }
    }
}
