//! Filter & aggregation
//!
//! `compute` recomputes every derived artifact from scratch on each call.
//! It holds no state between invocations, so identical inputs on an
//! unchanged dataset always yield identical outputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use super::criteria::FilterCriteria;
use super::export::to_csv;
use super::summary::SummaryStats;
use crate::dataset::{Dataset, DatasetResult, SalesRecord};

/// Summed sales of one region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionTotal {
    pub region: String,
    pub total: f64,
}

/// One point of a region's time series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Daily sales of one region, ordered chronologically
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionSeries {
    pub region: String,
    pub points: Vec<SeriesPoint>,
}

/// A region's proportion of the filtered total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionShare {
    pub region: String,
    pub share: f64,
}

/// Everything derived from one filter invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    /// Number of records in the filtered view
    pub row_count: usize,
    /// Per-region totals, in order of first appearance in the filtered view
    pub by_region_totals: Vec<RegionTotal>,
    /// One series per region, same order as `by_region_totals`
    pub time_series: Vec<RegionSeries>,
    /// Per-region proportions of the filtered total, summing to 1.0
    ///
    /// Empty when the filtered total is zero: both for an empty view and for a
    /// non-empty view whose amounts are all 0, where no proportion is defined.
    pub share_by_region: Vec<RegionShare>,
    pub summary: SummaryStats,
    /// The filtered view as CSV
    pub export: String,
}

impl Artifacts {
    /// Distinct dates across all series, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .time_series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.date))
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

/// Select the records matching the criteria, in dataset order
pub fn filter_records<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> Vec<&'a SalesRecord> {
    if criteria.selected_regions.is_empty() || criteria.date_range.is_inverted() {
        return Vec::new();
    }

    dataset
        .records()
        .iter()
        .filter(|r| criteria.matches(r))
        .collect()
}

/// Filter the dataset and derive totals, time series, shares, summary and export
pub fn compute(dataset: &Dataset, criteria: &FilterCriteria) -> DatasetResult<Artifacts> {
    let started = Instant::now();
    let filtered = filter_records(dataset, criteria);

    let by_region_totals = totals_by_region(&filtered);
    let time_series = series_by_region(&filtered, &by_region_totals);

    let amounts: Vec<f64> = filtered.iter().map(|r| r.sales).collect();
    let summary = SummaryStats::from_amounts(&amounts);
    let share_by_region = shares(&by_region_totals, summary.total);

    let export = to_csv(dataset.columns(), &filtered)?;

    tracing::debug!(
        regions = criteria.selected_regions.len(),
        start = %criteria.start_date(),
        end = %criteria.end_date(),
        rows = filtered.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "Computed dashboard artifacts"
    );

    Ok(Artifacts {
        row_count: filtered.len(),
        by_region_totals,
        time_series,
        share_by_region,
        summary,
        export,
    })
}

fn totals_by_region(records: &[&SalesRecord]) -> Vec<RegionTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<RegionTotal> = Vec::new();

    for record in records {
        let slot = *index.entry(record.region.as_str()).or_insert_with(|| {
            totals.push(RegionTotal {
                region: record.region.clone(),
                total: 0.0,
            });
            totals.len() - 1
        });
        totals[slot].total += record.sales;
    }

    totals
}

fn series_by_region(records: &[&SalesRecord], order: &[RegionTotal]) -> Vec<RegionSeries> {
    let mut daily: HashMap<&str, BTreeMap<NaiveDate, f64>> = HashMap::new();
    for record in records {
        *daily
            .entry(record.region.as_str())
            .or_default()
            .entry(record.date)
            .or_insert(0.0) += record.sales;
    }

    order
        .iter()
        .map(|t| RegionSeries {
            region: t.region.clone(),
            points: daily
                .remove(t.region.as_str())
                .unwrap_or_default()
                .into_iter()
                .map(|(date, value)| SeriesPoint { date, value })
                .collect(),
        })
        .collect()
}

fn shares(totals: &[RegionTotal], grand_total: f64) -> Vec<RegionShare> {
    if grand_total == 0.0 {
        return Vec::new();
    }

    totals
        .iter()
        .map(|t| RegionShare {
            region: t.region.clone(),
            share: t.total / grand_total,
        })
        .collect()
}
