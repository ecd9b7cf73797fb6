//! Weekday by hour activity grid.

use chrono::Weekday;
use serde::Serialize;

use crate::record::{Period, WEEK, day_name};
use crate::store::{RecordStore, Selector};

/// Record counts laid out as 7 weekday rows by 24 hourly columns.
///
/// Rows run Monday to Sunday and columns from `"00-01"` to `"23-00"`. Every
/// cell is present, so combinations without records hold zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    /// Row labels, `"Monday"` through `"Sunday"`
    pub days: Vec<&'static str>,
    /// Column labels
    pub periods: Vec<Period>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<usize>>,
}

impl Heatmap {
    fn zeroed() -> Self {
        Self {
            days: WEEK.iter().map(|&d| day_name(d)).collect(),
            periods: Period::all().collect(),
            cells: vec![vec![0; Period::COUNT]; WEEK.len()],
        }
    }

    /// Count for one weekday and hour bucket.
    pub fn get(&self, weekday: Weekday, period: Period) -> usize {
        self.cells[weekday.num_days_from_monday() as usize][period.index()]
    }

    /// One weekday's row.
    pub fn row(&self, weekday: Weekday) -> &[usize] {
        &self.cells[weekday.num_days_from_monday() as usize]
    }

    /// Sum of all cells.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }
}

/// Counts records by weekday and hour bucket.
pub fn activity_heatmap(store: &RecordStore, selector: &Selector) -> Heatmap {
    let mut heatmap = Heatmap::zeroed();
    for record in store.filter(selector) {
        let cal = record.calendar();
        heatmap.cells[cal.weekday.num_days_from_monday() as usize][cal.period.index()] += 1;
    }
    heatmap
}
