//! Parsed message records.
//!
//! This module provides [`MessageRecord`], one entry of a chat transcript with
//! its timestamp, [`Sender`], [`MessageKind`] and body, plus the calendar
//! fields ([`Calendar`]) that the analytics engine groups by. Calendar fields
//! are derived once, when the record is built.
//!
//! # Examples
//!
//! ```
//! use chatstat::record::{MessageKind, MessageRecord, MEDIA_OMITTED};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 2)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let hello = MessageRecord::user(ts, "Alice", "Hello");
//! assert_eq!(hello.kind(), MessageKind::UserMessage);
//! assert_eq!(hello.calendar().month_year_label, "January 2023");
//!
//! let media = MessageRecord::user(ts, "Alice", MEDIA_OMITTED);
//! assert_eq!(media.kind(), MessageKind::MediaPlaceholder);
//!
//! let notice = MessageRecord::system(ts, "Alice added Bob");
//! assert!(notice.sender().is_system());
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Serialize, Serializer};

/// Body that the export writes in place of an attachment.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Classification of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A text message written by a participant
    UserMessage,
    /// An entry without an author ("Alice added Bob", encryption notice, ...)
    SystemNotification,
    /// A participant's attachment, exported as [`MEDIA_OMITTED`]
    MediaPlaceholder,
}

impl MessageKind {
    /// Returns `true` for kinds that have a participant as author.
    pub fn is_user_authored(self) -> bool {
        !matches!(self, MessageKind::SystemNotification)
    }

    /// Stable snake_case name, used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::UserMessage => "user_message",
            MessageKind::SystemNotification => "system_notification",
            MessageKind::MediaPlaceholder => "media_placeholder",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author of a record: a participant, or [`System`](Sender::System) for
/// notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sender {
    /// Notification without an authoring participant
    System,
    /// A participant's display name (or phone number)
    User(String),
}

impl Sender {
    /// How [`Sender::System`] is displayed and exported.
    pub const SYSTEM_LABEL: &'static str = "SYSTEM";

    /// Returns the participant name, or [`SYSTEM_LABEL`](Self::SYSTEM_LABEL).
    pub fn as_str(&self) -> &str {
        match self {
            Sender::System => Self::SYSTEM_LABEL,
            Sender::User(name) => name,
        }
    }

    /// Returns the participant name, `None` for the system sender.
    pub fn name(&self) -> Option<&str> {
        match self {
            Sender::System => None,
            Sender::User(name) => Some(name),
        }
    }

    /// Returns `true` for [`Sender::System`].
    pub fn is_system(&self) -> bool {
        matches!(self, Sender::System)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Sender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One-hour bucket of the day, used as the heatmap's column axis.
///
/// Labels are `"00-01"` through `"22-23"`; the bucket starting at 23:00
/// spans midnight and is labelled `"23-00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period(u32);

impl Period {
    /// Number of buckets in a day.
    pub const COUNT: usize = 24;

    /// Bucket containing `hour` (taken modulo 24).
    pub fn from_hour(hour: u32) -> Self {
        Self(hour % 24)
    }

    /// First hour of the bucket.
    pub fn start(self) -> u32 {
        self.0
    }

    /// Column index in `0..24`.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Label such as `"09-10"` or `"23-00"`.
    pub fn label(self) -> String {
        format!("{:02}-{:02}", self.0, (self.0 + 1) % 24)
    }

    /// All buckets from midnight onwards.
    pub fn all() -> impl Iterator<Item = Period> {
        (0..24).map(Period)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// English name of a month number (1-12); empty for anything else.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

/// English name of a weekday.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekdays in heatmap row order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Calendar fields derived from a record's timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    /// Calendar date
    pub date: NaiveDate,
    /// Year, e.g. `2023`
    pub year: i32,
    /// Month number (1-12)
    pub month: u32,
    /// English month name
    pub month_name: &'static str,
    /// Day of the week
    #[serde(skip)]
    pub weekday: Weekday,
    /// English weekday name
    pub day_name: &'static str,
    /// Day of the month (1-31)
    pub day: u32,
    /// Hour (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Hour bucket for the heatmap
    pub period: Period,
    /// `"<MonthName> <Year>"`, the monthly timeline label
    pub month_year_label: String,
}

impl Calendar {
    /// Derives every calendar field from `timestamp`.
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        let date = timestamp.date();
        let month = date.month();
        let weekday = date.weekday();

        Self {
            date,
            year: date.year(),
            month,
            month_name: month_name(month),
            weekday,
            day_name: day_name(weekday),
            day: date.day(),
            hour: timestamp.hour(),
            minute: timestamp.minute(),
            period: Period::from_hour(timestamp.hour()),
            month_year_label: format!("{} {}", month_name(month), date.year()),
        }
    }
}

/// One parsed transcript entry.
///
/// Records can only be built through [`user`](Self::user) and
/// [`system`](Self::system), which keep `sender` and `kind` in agreement:
/// the sender is [`Sender::System`] exactly when the kind is
/// [`MessageKind::SystemNotification`], and a media placeholder's body is
/// always [`MEDIA_OMITTED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    timestamp: NaiveDateTime,
    sender: Sender,
    kind: MessageKind,
    body: String,
    #[serde(flatten)]
    calendar: Calendar,
}

impl MessageRecord {
    /// Creates a participant's record.
    ///
    /// A body equal to [`MEDIA_OMITTED`] (ignoring surrounding whitespace)
    /// makes the record a [`MessageKind::MediaPlaceholder`].
    pub fn user(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let body = body.into();
        let (kind, body) = if body.trim() == MEDIA_OMITTED {
            (MessageKind::MediaPlaceholder, MEDIA_OMITTED.to_string())
        } else {
            (MessageKind::UserMessage, body)
        };
        Self::build(timestamp, Sender::User(sender.into()), kind, body)
    }

    /// Creates a system notification.
    pub fn system(timestamp: NaiveDateTime, text: impl Into<String>) -> Self {
        Self::build(
            timestamp,
            Sender::System,
            MessageKind::SystemNotification,
            text.into(),
        )
    }

    fn build(timestamp: NaiveDateTime, sender: Sender, kind: MessageKind, body: String) -> Self {
        let timestamp = truncate_to_minute(timestamp);
        Self {
            calendar: Calendar::from_timestamp(&timestamp),
            timestamp,
            sender,
            kind,
            body,
        }
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the timestamp (minute precision).
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender.
    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    /// Returns the participant name, `None` for notifications.
    pub fn sender_name(&self) -> Option<&str> {
        self.sender.name()
    }

    /// Returns the classification.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the derived calendar fields.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Returns `true` for user messages and media placeholders.
    pub fn is_user_authored(&self) -> bool {
        self.kind.is_user_authored()
    }

    /// Returns `true` for media placeholders.
    pub fn is_media(&self) -> bool {
        self.kind == MessageKind::MediaPlaceholder
    }
}

fn truncate_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|ts| ts.with_nanosecond(0))
        .unwrap_or(timestamp)
}
