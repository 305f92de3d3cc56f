//! CSV export of a filtered view
//!
//! The payload mirrors the source layout: same header names in the same order,
//! dates as `YYYY-MM-DD`, sales as the raw decimal value.

use chrono::NaiveDateTime;

use crate::dataset::{ColumnSpec, Dataset, DatasetError, DatasetLoader, DatasetResult, SalesRecord};

pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

/// Serialize records as CSV using the given column layout
pub fn to_csv(columns: &[ColumnSpec], records: &[&SalesRecord]) -> DatasetResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.name.as_str()))?;
    for record in records {
        writer.write_record(columns.iter().map(|c| record.cell(c.kind)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DatasetError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DatasetError::Csv(e.to_string()))
}

/// Re-parse an export payload into a dataset
///
/// The loader must use the same column names as the one that produced
/// the exported dataset.
pub fn parse_export(payload: &str, loader: &DatasetLoader) -> DatasetResult<Dataset> {
    loader.load_str(payload)
}

/// Attachment filename for an export generated at `now`
pub fn export_filename(now: NaiveDateTime) -> String {
    format!("sales_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}
