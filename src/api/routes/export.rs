//! Export Routes
//!
//! - GET /api/v1/export - Download the filtered view as CSV

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{parse_date_param, ExportParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::engine::{export_filename, filter_records, to_csv, EXPORT_CONTENT_TYPE};

/// GET /api/v1/export
///
/// Export the records matching `regions`, `start` and `end` as a CSV attachment.
/// `regions` repeats once per selected region.
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let params = ExportParams::from_pairs(pairs);

    if !state.config.enable_export {
        return Err(ApiError::NotFound("Export feature is disabled".to_string()));
    }

    let start = parse_date_param("start", params.start.as_deref())?;
    let end = parse_date_param("end", params.end.as_deref())?;
    let criteria = state.dashboard.criteria(params.regions, start, end);

    let dataset = state.dataset();
    let records = filter_records(dataset, &criteria);
    let body = to_csv(dataset.columns(), &records)?;

    tracing::info!(rows = records.len(), bytes = body.len(), "Exported filtered view");

    let filename = export_filename(Utc::now().naive_utc());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
