//! Chart Specifications
//!
//! Renderer-agnostic chart descriptions built from engine artifacts.
//! The browser shell draws them; nothing here knows about layout.

use serde::{Deserialize, Serialize};

use crate::dataset::{DateRange, DATE_FORMAT};
use crate::engine::Artifacts;

pub const BAR_COLOR: &str = "rgba(255, 99, 132, 0.6)";
pub const LINE_COLOR: &str = "rgba(54, 162, 235, 0.6)";
pub const LINE_WIDTH: u32 = 4;

/// Slice colors for the share chart, cycled per region
pub const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

/// One renderable chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Labels for the x-axis (bar, line) or the slices (pie)
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Single data series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    /// Values aligned with `ChartSpec::labels`; `None` is a gap
    pub data: Vec<Option<f64>>,
    /// One color for the whole series, or one per point for pie slices
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<u32>,
}

/// Per-region totals as bars
pub fn bar_chart(artifacts: &Artifacts, range: &DateRange) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: format!(
            "Sales by Region from {} to {}",
            range.start.format(DATE_FORMAT),
            range.end.format(DATE_FORMAT)
        ),
        labels: artifacts
            .by_region_totals
            .iter()
            .map(|t| t.region.clone())
            .collect(),
        datasets: vec![ChartDataset {
            label: "Sales".to_string(),
            data: artifacts
                .by_region_totals
                .iter()
                .map(|t| Some(t.total))
                .collect(),
            colors: vec![BAR_COLOR.to_string()],
            line_width: None,
        }],
    }
}

/// One line per region over the union of dates in the filtered view
pub fn line_chart(artifacts: &Artifacts) -> ChartSpec {
    let dates = artifacts.dates();

    let datasets = artifacts
        .time_series
        .iter()
        .map(|series| {
            let mut points = series.points.iter().peekable();
            let data = dates
                .iter()
                .map(|date| points.next_if(|p| p.date == *date).map(|p| p.value))
                .collect();

            ChartDataset {
                label: series.region.clone(),
                data,
                colors: vec![LINE_COLOR.to_string()],
                line_width: Some(LINE_WIDTH),
            }
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Line,
        title: "Sales Trends Over Time".to_string(),
        labels: dates
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect(),
        datasets,
    }
}

/// Regional shares of the filtered total as pie slices
pub fn pie_chart(artifacts: &Artifacts) -> ChartSpec {
    let shares = &artifacts.share_by_region;

    ChartSpec {
        kind: ChartKind::Pie,
        title: "Sales Distribution by Region".to_string(),
        labels: shares.iter().map(|s| s.region.clone()).collect(),
        datasets: vec![ChartDataset {
            label: "Share".to_string(),
            data: shares.iter().map(|s| Some(s.share)).collect(),
            colors: (0..shares.len())
                .map(|i| SERIES_COLORS[i % SERIES_COLORS.len()].to_string())
                .collect(),
            line_width: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, SalesRecord};
    use crate::engine::{compute, FilterCriteria};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn artifacts() -> (Artifacts, FilterCriteria) {
        let dataset = Dataset::from_records(vec![
            SalesRecord::new("North", date(1), 100.0),
            SalesRecord::new("South", date(1), 50.0),
            SalesRecord::new("North", date(2), 200.0),
            SalesRecord::new("South", date(3), 150.0),
        ]);
        let criteria = FilterCriteria::new(["North", "South"], date(1), date(3));
        (compute(&dataset, &criteria).unwrap(), criteria)
    }

    #[test]
    fn test_bar_chart() {
        let (artifacts, criteria) = artifacts();
        let chart = bar_chart(&artifacts, &criteria.date_range);

        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title, "Sales by Region from 2024-01-01 to 2024-01-03");
        assert_eq!(chart.labels, vec!["North", "South"]);
        assert_eq!(chart.datasets[0].data, vec![Some(300.0), Some(200.0)]);
    }

    #[test]
    fn test_line_chart_aligns_series_to_dates() {
        let (artifacts, _) = artifacts();
        let chart = line_chart(&artifacts);

        assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[0].label, "North");
        assert_eq!(chart.datasets[0].data, vec![Some(100.0), Some(200.0), None]);
        assert_eq!(chart.datasets[1].data, vec![Some(50.0), None, Some(150.0)]);
        assert_eq!(chart.datasets[1].line_width, Some(LINE_WIDTH));
    }

    #[test]
    fn test_pie_chart() {
        let (artifacts, _) = artifacts();
        let chart = pie_chart(&artifacts);

        assert_eq!(chart.labels, vec!["North", "South"]);
        assert_eq!(chart.datasets[0].data, vec![Some(0.6), Some(0.4)]);
        assert_eq!(chart.datasets[0].colors, vec!["#FF9800", "#4CAF50"]);
    }

    #[test]
    fn test_empty_charts() {
        let dataset = Dataset::from_records(Vec::new());
        let criteria = FilterCriteria::new(["North"], date(1), date(3));
        let artifacts = compute(&dataset, &criteria).unwrap();

        assert!(bar_chart(&artifacts, &criteria.date_range).labels.is_empty());
        assert!(line_chart(&artifacts).datasets.is_empty());
        assert!(pie_chart(&artifacts).datasets[0].data.is_empty());
    }
}
