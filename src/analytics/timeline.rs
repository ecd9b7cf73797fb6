//! Activity over time: monthly and daily timelines, plus the busiest weekday
//! and month breakdowns.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::record::{WEEK, day_name, month_name};
use crate::store::{RecordStore, Selector};

/// Records in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// Year
    pub year: i32,
    /// Month number (1-12)
    pub month: u32,
    /// `"January 2023"`
    pub label: String,
    /// Number of records
    pub messages: usize,
}

/// Records on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Calendar date
    pub date: NaiveDate,
    /// Number of records
    pub messages: usize,
}

/// Records falling on one day of the week, across the whole transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    /// `"Monday"` through `"Sunday"`
    pub day: &'static str,
    /// Number of records
    pub messages: usize,
}

/// Records falling in one month of the year, across all years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthActivity {
    /// `"January"` through `"December"`
    pub month: &'static str,
    /// Number of records
    pub messages: usize,
}

/// Record counts per `(year, month)`, ascending. Months without records are
/// left out.
pub fn monthly_timeline(store: &RecordStore, selector: &Selector) -> Vec<MonthlyCount> {
    let mut buckets: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for record in store.filter(selector) {
        let cal = record.calendar();
        *buckets.entry((cal.year, cal.month)).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), messages)| MonthlyCount {
            year,
            month,
            label: format!("{} {}", month_name(month), year),
            messages,
        })
        .collect()
}

/// Record counts per calendar date, ascending. Dates without records are
/// left out.
pub fn daily_timeline(store: &RecordStore, selector: &Selector) -> Vec<DailyCount> {
    let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in store.filter(selector) {
        *buckets.entry(record.calendar().date).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|(date, messages)| DailyCount { date, messages })
        .collect()
}

/// Record counts per weekday, Monday first. All seven days are present.
pub fn weekday_activity(store: &RecordStore, selector: &Selector) -> Vec<WeekdayCount> {
    let mut counts = [0usize; 7];
    for record in store.filter(selector) {
        counts[record.calendar().weekday.num_days_from_monday() as usize] += 1;
    }

    WEEK.iter()
        .zip(counts)
        .map(|(&weekday, messages)| WeekdayCount {
            day: day_name(weekday),
            messages,
        })
        .collect()
}

/// Record counts per month of the year, January first. All twelve months
/// are present.
pub fn month_activity(store: &RecordStore, selector: &Selector) -> Vec<MonthActivity> {
    let mut counts = [0usize; 12];
    for record in store.filter(selector) {
        counts[record.calendar().date.month0() as usize] += 1;
    }

    (1..=12)
        .zip(counts)
        .map(|(month, messages)| MonthActivity {
            month: month_name(month),
            messages,
        })
        .collect()
}
