//! Core data types for the sales dataset
//!
//! This module defines the fundamental types shared by the loader and the engine:
//! - `SalesRecord`: a single sales observation
//! - `ColumnSpec` and `ColumnKind`: the column layout of the source file
//! - `Dataset`: the immutable, in-memory table
//! - `DateRange`: an inclusive calendar-date interval

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical header names of the required columns
pub const DATE_COLUMN: &str = "Date";
pub const REGION_COLUMN: &str = "Region";
pub const SALES_COLUMN: &str = "Sales";

/// Date format used for display, export and request parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single sales observation
///
/// Extra source columns are carried verbatim in `extra`, indexed by
/// [`ColumnKind::Extra`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesRecord {
    /// Sales region (category)
    pub region: String,
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Sales amount
    pub sales: f64,
    /// Pass-through columns, in source order
    #[serde(default)]
    pub extra: Vec<String>,
}

impl SalesRecord {
    /// Create a record without pass-through columns
    pub fn new(region: impl Into<String>, date: NaiveDate, sales: f64) -> Self {
        Self {
            region: region.into(),
            date,
            sales,
            extra: Vec::new(),
        }
    }

    /// Builder method: append a pass-through value
    pub fn extra(mut self, value: impl Into<String>) -> Self {
        self.extra.push(value.into());
        self
    }

    /// Render the cell for a column of the source layout
    pub fn cell(&self, kind: ColumnKind) -> String {
        match kind {
            ColumnKind::Date => self.date.format(DATE_FORMAT).to_string(),
            ColumnKind::Region => self.region.clone(),
            ColumnKind::Sales => self.sales.to_string(),
            ColumnKind::Extra(idx) => self.extra.get(idx).cloned().unwrap_or_default(),
        }
    }
}

/// What a source column holds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Date,
    Region,
    Sales,
    /// Pass-through column; index into `SalesRecord::extra`
    Extra(usize),
}

/// One column of the source header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header name exactly as it appeared in the source
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Inclusive calendar-date interval: [start, end]
///
/// An inverted range (start > end) is allowed and contains no date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check if a date falls within this range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// The loaded sales table
///
/// Built once at startup and shared read-only for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<ColumnSpec>,
    records: Vec<SalesRecord>,
}

impl Dataset {
    /// Create a dataset from a column layout and its records
    pub fn new(columns: Vec<ColumnSpec>, records: Vec<SalesRecord>) -> Self {
        Self { columns, records }
    }

    /// Create a dataset with the canonical `Date,Region,Sales` layout
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self::new(Self::default_columns(), records)
    }

    pub fn default_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new(DATE_COLUMN, ColumnKind::Date),
            ColumnSpec::new(REGION_COLUMN, ColumnKind::Region),
            ColumnSpec::new(SALES_COLUMN, ColumnKind::Sales),
        ]
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct regions in order of first appearance
    pub fn regions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.region.as_str())
            .filter(|region| seen.insert(*region))
            .collect()
    }

    /// Earliest and latest date in the dataset, `None` when empty
    pub fn date_bounds(&self) -> Option<DateRange> {
        let start = self.records.iter().map(|r| r.date).min()?;
        let end = self.records.iter().map(|r| r.date).max()?;
        Some(DateRange::new(start, end))
    }
}
