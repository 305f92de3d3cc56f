//! Dashboard Routes
//!
//! - POST /api/v1/dashboard - Filter the dataset and return charts and summary

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{parse_date_param, DashboardRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::DashboardView;

/// POST /api/v1/dashboard
///
/// Recompute every chart and the summary block for the posted criteria.
/// An empty region list or a range with no records yields empty charts.
pub async fn render_dashboard(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DashboardRequest>,
) -> ApiResult<Json<DashboardView>> {
    let start = parse_date_param("start_date", req.start_date.as_deref())?;
    let end = parse_date_param("end_date", req.end_date.as_deref())?;

    let criteria = state.dashboard.criteria(req.regions, start, end);
    let view = state.dashboard.render(&criteria)?;

    tracing::info!(
        regions = ?view.criteria.regions,
        start = %view.criteria.start_date,
        end = %view.criteria.end_date,
        rows = view.row_count,
        "Rendered dashboard"
    );

    Ok(Json(view))
}
