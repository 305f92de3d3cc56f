//! Summary statistics
//!
//! Scalar aggregates over a filtered view plus their currency-style rendering.

use serde::{Deserialize, Serialize};

/// Placeholder shown for an aggregate that has no value (empty view)
pub const NO_DATA: &str = "N/A";

/// How to reduce a set of sales amounts to one value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Average,
    Max,
}

impl Aggregation {
    /// Aggregate a slice of values according to this type
    pub fn aggregate(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }

        Some(match self {
            Aggregation::Sum => values.iter().sum(),
            Aggregation::Average => values.iter().sum::<f64>() / values.len() as f64,
            Aggregation::Max => values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

/// Total, mean and maximum of the filtered sales amounts
///
/// Over an empty view `total` is 0 while `average` and `maximum` are `None`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub total: f64,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
    pub count: usize,
}

impl SummaryStats {
    pub fn from_amounts(values: &[f64]) -> Self {
        Self {
            total: Aggregation::Sum.aggregate(values).unwrap_or(0.0),
            average: Aggregation::Average.aggregate(values),
            maximum: Aggregation::Max.aggregate(values),
            count: values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Render the three-line summary block shown above the charts
    pub fn render(&self, symbol: &str) -> String {
        let fmt = |v: Option<f64>| match v {
            Some(v) => format_currency(v, symbol),
            None => NO_DATA.to_string(),
        };

        format!(
            "Total Sales: {}\nAverage Sales: {}\nHighest Sales: {}",
            format_currency(self.total, symbol),
            fmt(self.average),
            fmt(self.maximum)
        )
    }
}

/// Format a value as currency: symbol prefix, thousands separators, two decimals
pub fn format_currency(value: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregations() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        assert_eq!(Aggregation::Sum.aggregate(&values), Some(15.0));
        assert_eq!(Aggregation::Average.aggregate(&values), Some(3.0));
        assert_eq!(Aggregation::Max.aggregate(&values), Some(5.0));

        let empty: Vec<f64> = vec![];
        assert_eq!(Aggregation::Sum.aggregate(&empty), None);
    }

    #[test]
    fn test_summary_from_amounts() {
        let stats = SummaryStats::from_amounts(&[100.0, 200.0]);

        assert_eq!(stats.total, 300.0);
        assert_eq!(stats.average, Some(150.0));
        assert_eq!(stats.maximum, Some(200.0));
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_empty_summary_policy() {
        let stats = SummaryStats::from_amounts(&[]);

        assert!(stats.is_empty());
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.average, None);
        assert_eq!(stats.maximum, None);
        assert_eq!(
            stats.render("$"),
            "Total Sales: $0.00\nAverage Sales: N/A\nHighest Sales: N/A"
        );
    }

    #[test]
    fn test_render() {
        let stats = SummaryStats::from_amounts(&[100.0, 200.0]);
        assert_eq!(
            stats.render("$"),
            "Total Sales: $300.00\nAverage Sales: $150.00\nHighest Sales: $200.00"
        );
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(999.999, "$"), "$1,000.00");
        assert_eq!(format_currency(1234.5, "$"), "$1,234.50");
        assert_eq!(format_currency(1234567.891, "$"), "$1,234,567.89");
        assert_eq!(format_currency(-42.0, "€"), "-€42.00");
        assert_eq!(format_currency(-0.001, "$"), "$0.00");
    }
}
