//! Dashboard
//!
//! The single entry point the UI shell calls on every input change:
//! control defaults once on page load, then one `render` per interaction.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::charts::{bar_chart, line_chart, pie_chart, ChartSpec};
use crate::config::DashboardConfig;
use crate::dataset::{Dataset, DatasetResult, DateRange, DATE_FORMAT};
use crate::engine::{compute, FilterCriteria, SummaryStats};

/// Display format hint for the date pickers
pub const DATE_PICKER_FORMAT: &str = "YYYY-MM-DD";

/// Initial state of the dashboard controls
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Controls {
    /// Region options, in order of first appearance in the dataset
    pub regions: Vec<String>,
    /// Regions checked on first load
    pub default_regions: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub date_format: String,
}

/// Criteria echoed back with every view
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppliedCriteria {
    pub regions: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Everything the UI shell renders after one interaction
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub criteria: AppliedCriteria,
    pub row_count: usize,
    pub bar_chart: ChartSpec,
    pub line_chart: ChartSpec,
    pub pie_chart: ChartSpec,
    pub summary: SummaryStats,
    pub summary_text: String,
    /// Link that downloads the current filtered view as CSV
    pub export_url: String,
    /// The filtered view as CSV, for shells that offer the download inline
    pub export_csv: String,
}

/// Read-only dashboard over a loaded dataset
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> Self {
        Self { dataset, config }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Region options, default selection and date bounds
    pub fn controls(&self) -> Controls {
        let regions: Vec<String> = self.dataset.regions().into_iter().map(String::from).collect();

        let mut default_regions: Vec<String> = self
            .config
            .default_regions
            .iter()
            .filter(|r| regions.contains(*r))
            .cloned()
            .collect();
        if default_regions.is_empty() {
            default_regions.extend(regions.first().cloned());
        }

        let bounds = self.dataset.date_bounds();

        Controls {
            regions,
            default_regions,
            start_date: bounds.map(|b| b.start),
            end_date: bounds.map(|b| b.end),
            date_format: DATE_PICKER_FORMAT.to_string(),
        }
    }

    /// Build criteria, defaulting missing dates to the dataset bounds
    pub fn criteria<I, S>(
        &self,
        regions: I,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> FilterCriteria
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bounds = self
            .dataset
            .date_bounds()
            .unwrap_or_else(|| DateRange::new(NaiveDate::MIN, NaiveDate::MAX));

        FilterCriteria::new(
            regions,
            start_date.unwrap_or(bounds.start),
            end_date.unwrap_or(bounds.end),
        )
    }

    /// Recompute every chart and the summary for one set of criteria
    pub fn render(&self, criteria: &FilterCriteria) -> DatasetResult<DashboardView> {
        let artifacts = compute(&self.dataset, criteria)?;

        Ok(DashboardView {
            criteria: AppliedCriteria {
                regions: criteria.selected_regions.iter().cloned().collect(),
                start_date: criteria.start_date(),
                end_date: criteria.end_date(),
            },
            row_count: artifacts.row_count,
            bar_chart: bar_chart(&artifacts, &criteria.date_range),
            line_chart: line_chart(&artifacts),
            pie_chart: pie_chart(&artifacts),
            summary: artifacts.summary,
            summary_text: artifacts.summary.render(&self.config.currency_symbol),
            export_url: self.export_url(criteria),
            export_csv: artifacts.export,
        })
    }

    /// Export link carrying the criteria as query parameters, one `regions` pair per region
    pub fn export_url(&self, criteria: &FilterCriteria) -> String {
        let mut query: Vec<String> = criteria
            .selected_regions
            .iter()
            .map(|r| format!("regions={}", urlencoding::encode(r)))
            .collect();
        query.push(format!("start={}", criteria.start_date().format(DATE_FORMAT)));
        query.push(format!("end={}", criteria.end_date().format(DATE_FORMAT)));

        format!("{}?{}", self.config.export_path, query.join("&"))
    }
}
