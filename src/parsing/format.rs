//! Timestamp-prefix format families and their detection.
//!
//! WhatsApp exports vary by platform and locale. A family is one combination
//! of framing, clock and date separator:
//!
//! | Framing | Example |
//! |---------|---------|
//! | [`Framing::Dash`] | `1/15/24, 10:30 AM - Alice: Hello` |
//! | [`Framing::Bracket`] | `[15.01.24, 10:30:45] Alice: Hello` |
//!
//! Exactly one family is chosen per transcript by probing its first logical
//! units ([`detect_format`]); the family is then applied to every unit.

use std::fmt;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use serde::Serialize;

use crate::config::DateOrder;

/// Horizontal whitespace seen between timestamp parts, including the no-break
/// and narrow no-break spaces newer exports put before AM/PM.
const SPACE: &str = r"[ \t\x{00A0}\x{202F}]";

/// How the timestamp is separated from the rest of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// `1/15/24, 10:30 - rest` (Android)
    Dash,
    /// `[1/15/24, 10:30:45] rest` (iOS)
    Bracket,
}

/// 12-hour clock with an AM/PM marker, or 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Clock {
    /// `10:30 AM`, `10:30 pm`, `10:30 a.m.`
    TwelveHour,
    /// `22:30`
    TwentyFourHour,
}

/// Character between the date components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSeparator {
    /// `1/15/24`
    Slash,
    /// `1-15-24`
    Dash,
    /// `15.01.24`, always day-first
    Dot,
}

impl DateSeparator {
    /// The separator character.
    pub fn as_char(self) -> char {
        match self {
            DateSeparator::Slash => '/',
            DateSeparator::Dash => '-',
            DateSeparator::Dot => '.',
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            DateSeparator::Slash => "/",
            DateSeparator::Dash => "-",
            DateSeparator::Dot => r"\.",
        }
    }
}

/// One timestamp-prefix format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimestampFormat {
    /// Timestamp framing
    pub framing: Framing,
    /// Clock style
    pub clock: Clock,
    /// Date separator
    pub separator: DateSeparator,
}

const fn family(framing: Framing, clock: Clock, separator: DateSeparator) -> TimestampFormat {
    TimestampFormat {
        framing,
        clock,
        separator,
    }
}

/// Every known family, in detection tie-break order.
const ALL_FORMATS: [TimestampFormat; 12] = [
    family(Framing::Dash, Clock::TwelveHour, DateSeparator::Slash),
    family(Framing::Dash, Clock::TwelveHour, DateSeparator::Dash),
    family(Framing::Dash, Clock::TwelveHour, DateSeparator::Dot),
    family(Framing::Dash, Clock::TwentyFourHour, DateSeparator::Slash),
    family(Framing::Dash, Clock::TwentyFourHour, DateSeparator::Dash),
    family(Framing::Dash, Clock::TwentyFourHour, DateSeparator::Dot),
    family(Framing::Bracket, Clock::TwelveHour, DateSeparator::Slash),
    family(Framing::Bracket, Clock::TwelveHour, DateSeparator::Dash),
    family(Framing::Bracket, Clock::TwelveHour, DateSeparator::Dot),
    family(Framing::Bracket, Clock::TwentyFourHour, DateSeparator::Slash),
    family(Framing::Bracket, Clock::TwentyFourHour, DateSeparator::Dash),
    family(Framing::Bracket, Clock::TwentyFourHour, DateSeparator::Dot),
];

impl TimestampFormat {
    /// Creates a family from its parts.
    pub const fn new(framing: Framing, clock: Clock, separator: DateSeparator) -> Self {
        family(framing, clock, separator)
    }

    /// Returns all known families.
    pub fn all() -> &'static [TimestampFormat] {
        &ALL_FORMATS
    }

    /// Returns `true` if the family fixes the day/month order (dotted dates).
    pub fn is_day_first_only(self) -> bool {
        self.separator == DateSeparator::Dot
    }

    /// Position in [`all`](Self::all).
    fn index(self) -> usize {
        let framing = match self.framing {
            Framing::Dash => 0,
            Framing::Bracket => 6,
        };
        let clock = match self.clock {
            Clock::TwelveHour => 0,
            Clock::TwentyFourHour => 3,
        };
        let separator = match self.separator {
            DateSeparator::Slash => 0,
            DateSeparator::Dash => 1,
            DateSeparator::Dot => 2,
        };
        framing + clock + separator
    }

    /// Returns the regex pattern matching a whole logical unit of this family.
    ///
    /// Named groups: `first`, `second`, `year`, `hour`, `minute`, `meridiem`
    /// (12-hour only) and `rest` (everything after the timestamp).
    pub fn pattern(self) -> String {
        let sp = SPACE;
        let sep = self.separator.pattern();
        let date =
            format!(r"(?P<first>\d{{1,2}}){sep}(?P<second>\d{{1,2}}){sep}(?P<year>\d{{4}}|\d{{2}})");
        let time = match self.clock {
            Clock::TwelveHour => format!(
                r"(?P<hour>\d{{1,2}}):(?P<minute>\d{{2}})(?::\d{{2}})?{sp}?(?P<meridiem>[AaPp]\.?{sp}?[Mm]\.?)"
            ),
            Clock::TwentyFourHour => r"(?P<hour>\d{1,2}):(?P<minute>\d{2})(?::\d{2})?".to_string(),
        };
        match self.framing {
            Framing::Dash => {
                format!(r"^\x{{200E}}?{date},?{sp}+{time}{sp}*-{sp}*(?P<rest>(?s:.*))")
            }
            Framing::Bracket => {
                format!(r"^\x{{200E}}?\[{date},?{sp}+{time}\]{sp}*(?P<rest>(?s:.*))")
            }
        }
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framing::Dash => write!(f, "dash-delimited"),
            Framing::Bracket => write!(f, "bracketed"),
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clock::TwelveHour => write!(f, "12-hour"),
            Clock::TwentyFourHour => write!(f, "24-hour"),
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} '{}'-dated",
            self.framing,
            self.clock,
            self.separator.as_char()
        )
    }
}

/// AM/PM marker of a 12-hour timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// Before noon
    Am,
    /// Noon and after
    Pm,
}

/// Timestamp components as written, before the day/month order is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTimestamp<'a> {
    /// First date component (day or month)
    pub first: u32,
    /// Second date component (month or day)
    pub second: u32,
    /// Four-digit year (two-digit years already mapped to 2000+)
    pub year: i32,
    /// Hour as written
    pub hour: u32,
    /// Minute
    pub minute: u32,
    /// AM/PM marker for 12-hour families
    pub meridiem: Option<Meridiem>,
    /// Text after the timestamp prefix
    pub rest: &'a str,
}

impl RawTimestamp<'_> {
    /// Resolves the components into a calendar instant.
    ///
    /// Returns `None` if the date or time does not exist under `order`.
    pub fn resolve(&self, order: DateOrder) -> Option<NaiveDateTime> {
        let (day, month) = order.arrange(self.first, self.second);
        let hour = match (self.meridiem, self.hour) {
            (None, hour) => hour,
            (Some(_), 0 | 13..) => return None,
            (Some(Meridiem::Am), 12) => 0,
            (Some(Meridiem::Am), hour) => hour,
            (Some(Meridiem::Pm), 12) => 12,
            (Some(Meridiem::Pm), hour) => hour + 12,
        };
        NaiveDate::from_ymd_opt(self.year, month, day)?.and_hms_opt(hour, self.minute, 0)
    }
}

impl<'a> RawTimestamp<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let number = |name: &str| caps.name(name)?.as_str().parse::<u32>().ok();
        let year_digits = caps.name("year")?.as_str();
        let year: i32 = year_digits.parse().ok()?;
        let year = if year_digits.len() == 2 { 2000 + year } else { year };
        let meridiem = caps.name("meridiem").map(|m| {
            if m.as_str().starts_with(['a', 'A']) {
                Meridiem::Am
            } else {
                Meridiem::Pm
            }
        });

        Some(Self {
            first: number("first")?,
            second: number("second")?,
            year,
            hour: number("hour")?,
            minute: number("minute")?,
            meridiem,
            rest: caps.name("rest").map_or("", |m| m.as_str()),
        })
    }
}

/// A compiled family pattern.
#[derive(Debug)]
pub struct FormatMatcher {
    format: TimestampFormat,
    regex: Regex,
}

impl FormatMatcher {
    fn new(format: TimestampFormat) -> Self {
        Self {
            format,
            regex: Regex::new(&format.pattern()).expect("valid timestamp pattern"),
        }
    }

    /// Returns the compiled matcher for `format`.
    pub fn for_format(format: TimestampFormat) -> &'static FormatMatcher {
        &matchers()[format.index()]
    }

    /// The family this matcher recognizes.
    pub fn format(&self) -> TimestampFormat {
        self.format
    }

    /// Returns `true` if `unit` starts with this family's timestamp.
    pub fn matches(&self, unit: &str) -> bool {
        self.regex.is_match(unit)
    }

    /// Splits `unit` into its timestamp components and the remaining text.
    pub fn captures<'a>(&self, unit: &'a str) -> Option<RawTimestamp<'a>> {
        let caps = self.regex.captures(unit)?;
        RawTimestamp::from_captures(&caps)
    }
}

fn matchers() -> &'static [FormatMatcher] {
    static MATCHERS: OnceLock<Vec<FormatMatcher>> = OnceLock::new();
    MATCHERS.get_or_init(|| ALL_FORMATS.iter().map(|&f| FormatMatcher::new(f)).collect())
}

/// Regex recognizing the start of a logical unit in any known family.
///
/// Used by the line segmenter, before a family has been chosen.
pub fn timestamp_head() -> &'static Regex {
    static HEAD: OnceLock<Regex> = OnceLock::new();
    HEAD.get_or_init(|| {
        let sp = SPACE;
        let date = r"\d{1,2}[/.\-]\d{1,2}[/.\-](?:\d{4}|\d{2})";
        let time = format!(r"\d{{1,2}}:\d{{2}}(?::\d{{2}})?(?:{sp}?[AaPp]\.?{sp}?[Mm]\.?)?");
        Regex::new(&format!(
            r"^\x{{200E}}?(?:\[{date},?{sp}+{time}\]|{date},?{sp}+{time}{sp}*-)"
        ))
        .expect("valid timestamp head regex")
    })
}

/// Auto-detects the format family by scoring sample units.
///
/// Returns the family matching the most units (ties go to the family listed
/// first in [`TimestampFormat::all`]), or `None` if nothing matches.
pub fn detect_format(units: &[&str]) -> Option<TimestampFormat> {
    let mut scores = [0usize; ALL_FORMATS.len()];

    for unit in units {
        for (i, matcher) in matchers().iter().enumerate() {
            if matcher.matches(unit) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(ALL_FORMATS[winner_idx])
}
