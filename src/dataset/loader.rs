//! CSV Loader
//!
//! Reads the sales table from a CSV source with a header row.
//! Required columns are located by name; every other column is carried
//! through unmodified so exports reproduce the source layout.

use super::error::{DatasetError, DatasetResult};
use super::types::{
    ColumnKind, ColumnSpec, Dataset, SalesRecord, DATE_COLUMN, DATE_FORMAT, REGION_COLUMN,
    SALES_COLUMN,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

/// Fallback date formats tried after the configured one
const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Sales table loader with configurable column names
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    date_column: String,
    region_column: String,
    sales_column: String,
    date_format: String,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    /// Create a loader expecting `Date`, `Region` and `Sales` columns
    pub fn new() -> Self {
        Self {
            date_column: DATE_COLUMN.to_string(),
            region_column: REGION_COLUMN.to_string(),
            sales_column: SALES_COLUMN.to_string(),
            date_format: DATE_FORMAT.to_string(),
        }
    }

    pub fn with_date_column(mut self, name: &str) -> Self {
        self.date_column = name.to_string();
        self
    }

    pub fn with_region_column(mut self, name: &str) -> Self {
        self.region_column = name.to_string();
        self
    }

    pub fn with_sales_column(mut self, name: &str) -> Self {
        self.sales_column = name.to_string();
        self
    }

    /// Set the preferred strftime format for the date column
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Load the dataset from a CSV file
    pub fn load(&self, path: &Path) -> DatasetResult<Dataset> {
        let file = std::fs::File::open(path)?;
        let dataset = self.load_from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            regions = dataset.regions().len(),
            "Loaded sales dataset"
        );

        Ok(dataset)
    }

    /// Load from a CSV string (useful for testing)
    pub fn load_str(&self, csv_data: &str) -> DatasetResult<Dataset> {
        self.load_from_reader(csv_data.as_bytes())
    }

    /// Load the dataset from any CSV reader
    pub fn load_from_reader<R: Read>(&self, reader: R) -> DatasetResult<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = self.resolve_columns(&headers)?;

        let mut records = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            // header is line 1
            let line = row_num + 2;
            let row = result?;
            records.push(self.parse_row(&columns, &row, line)?);
        }

        Ok(Dataset::new(columns, records))
    }

    /// Map each header to its column kind, failing if a required one is absent
    fn resolve_columns(&self, headers: &csv::StringRecord) -> DatasetResult<Vec<ColumnSpec>> {
        let date_idx = find_column(headers, &self.date_column)?;
        let region_idx = find_column(headers, &self.region_column)?;
        let sales_idx = find_column(headers, &self.sales_column)?;

        let mut extra_count = 0;
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let kind = if idx == date_idx {
                    ColumnKind::Date
                } else if idx == region_idx {
                    ColumnKind::Region
                } else if idx == sales_idx {
                    ColumnKind::Sales
                } else {
                    extra_count += 1;
                    ColumnKind::Extra(extra_count - 1)
                };
                ColumnSpec::new(name, kind)
            })
            .collect();

        Ok(columns)
    }

    fn parse_row(
        &self,
        columns: &[ColumnSpec],
        row: &csv::StringRecord,
        line: usize,
    ) -> DatasetResult<SalesRecord> {
        let mut region = String::new();
        let mut date = None;
        let mut sales = None;
        let mut extra = Vec::new();

        for (spec, value) in columns.iter().zip(row.iter()) {
            match spec.kind {
                ColumnKind::Date => date = Some(self.parse_date(value, line)?),
                ColumnKind::Region => region = value.to_string(),
                ColumnKind::Sales => sales = Some(parse_amount(value, line)?),
                ColumnKind::Extra(_) => extra.push(value.to_string()),
            }
        }

        // the csv reader rejects ragged rows, so both cells were visited
        let date = date.ok_or_else(|| DatasetError::InvalidDate {
            line,
            value: String::new(),
        })?;
        let sales = sales.ok_or_else(|| DatasetError::InvalidAmount {
            line,
            value: String::new(),
        })?;

        Ok(SalesRecord {
            region,
            date,
            sales,
            extra,
        })
    }

    /// Parse a date cell, discarding any time component
    fn parse_date(&self, value: &str, line: usize) -> DatasetResult<NaiveDate> {
        let value = value.trim();

        if let Ok(date) = NaiveDate::parse_from_str(value, &self.date_format) {
            return Ok(date);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, &self.date_format) {
            return Ok(dt.date());
        }

        for fmt in FALLBACK_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
                return Ok(date);
            }
        }
        for fmt in FALLBACK_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
                return Ok(dt.date());
            }
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(dt.date_naive());
        }

        Err(DatasetError::InvalidDate {
            line,
            value: value.to_string(),
        })
    }
}

/// Locate a header by exact name, then case-insensitively
fn find_column(headers: &csv::StringRecord, name: &str) -> DatasetResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name)))
        .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
}

fn parse_amount(value: &str, line: usize) -> DatasetResult<f64> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(DatasetError::InvalidAmount {
            line,
            value: value.to_string(),
        }),
    }
}

/// Load a dataset with the default column names
pub fn load(path: &Path) -> DatasetResult<Dataset> {
    DatasetLoader::new().load(path)
}
