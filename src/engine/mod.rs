//! Filter & Aggregation Engine
//!
//! - **criteria**: The user's region selection and date range
//! - **aggregate**: `compute`, the pure filter/group-by/aggregate pass
//! - **summary**: Total, average and maximum plus currency formatting
//! - **export**: CSV serialization of the filtered view
//!
//! # Architecture
//!
//! ```text
//!   Dataset + FilterCriteria
//!        → filter (region ∈ selection, start ≤ date ≤ end)
//!        → group by region / (date, region)
//!        → totals, time series, shares, summary, CSV
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use salesboard::dataset::{Dataset, SalesRecord};
//! use salesboard::engine::{compute, FilterCriteria};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let dataset = Dataset::from_records(vec![
//!     SalesRecord::new("North", day(1), 100.0),
//!     SalesRecord::new("North", day(2), 200.0),
//!     SalesRecord::new("South", day(1), 50.0),
//! ]);
//!
//! let criteria = FilterCriteria::new(["North"], day(1), day(2));
//! let artifacts = compute(&dataset, &criteria).unwrap();
//!
//! assert_eq!(artifacts.summary.total, 300.0);
//! assert_eq!(artifacts.summary.average, Some(150.0));
//! ```

pub mod aggregate;
pub mod criteria;
pub mod export;
pub mod summary;

pub use aggregate::{
    compute, filter_records, Artifacts, RegionSeries, RegionShare, RegionTotal, SeriesPoint,
};
pub use criteria::FilterCriteria;
pub use export::{export_filename, parse_export, to_csv, EXPORT_CONTENT_TYPE};
pub use summary::{format_currency, Aggregation, SummaryStats, NO_DATA};
