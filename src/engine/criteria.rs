//! Filter criteria
//!
//! The transient value object built from the user's current control state.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::dataset::{DateRange, SalesRecord};

/// Selected regions plus an inclusive date range
///
/// An empty region set selects nothing; there is no implicit "select all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub selected_regions: BTreeSet<String>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new<I, S>(regions: I, start_date: NaiveDate, end_date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_regions: regions.into_iter().map(Into::into).collect(),
            date_range: DateRange::new(start_date, end_date),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.date_range.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.date_range.end
    }

    /// Check if a record passes both the region and the date filter
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.selected_regions.contains(&record.region) && self.date_range.contains(record.date)
    }
}
