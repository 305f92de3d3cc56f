//! Control Routes
//!
//! - GET /api/v1/controls - Region options, default selection and date bounds

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::Controls;

/// GET /api/v1/controls
///
/// Initial state for the region checklist and the date range picker.
pub async fn get_controls(State(state): State<Arc<AppState>>) -> Json<Controls> {
    Json(state.dashboard.controls())
}
