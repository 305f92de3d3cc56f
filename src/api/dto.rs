//! Data Transfer Objects
//!
//! Request and response types for the API endpoints, plus the
//! parsing helpers shared by the handlers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::dataset::DATE_FORMAT;

// ============================================
// DASHBOARD DTOs
// ============================================

/// Dashboard render request
#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    /// Selected regions; empty selects nothing
    #[serde(default)]
    pub regions: Vec<String>,
    /// Inclusive start date (YYYY-MM-DD), defaults to the earliest date
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive end date (YYYY-MM-DD), defaults to the latest date
    #[serde(default)]
    pub end_date: Option<String>,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
///
/// Regions arrive as one `regions=` pair per region so names containing
/// commas or surrounding spaces survive unchanged.
#[derive(Debug, Default, PartialEq)]
pub struct ExportParams {
    /// Region names, verbatim
    pub regions: Vec<String>,
    /// Start date (YYYY-MM-DD)
    pub start: Option<String>,
    /// End date (YYYY-MM-DD)
    pub end: Option<String>,
}

impl ExportParams {
    /// Collect decoded query pairs; unknown keys are ignored, the last `start`/`end` wins
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "regions" => params.regions.push(value),
                "start" => params.start = Some(value),
                "end" => params.end = Some(value),
                _ => {}
            }
        }
        params
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Dataset status: ok, empty
    pub dataset: String,
    /// Number of loaded records
    pub records: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

// ============================================
// PARSING
// ============================================

/// Parse an optional date parameter
///
/// Accepts `YYYY-MM-DD`, a naive ISO datetime or RFC 3339; the time part is dropped.
pub fn parse_date_param(name: &str, value: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    let Some(s) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(Some(date));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(dt.date()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(dt.date_naive()));
    }

    Err(ApiError::Validation(format!(
        "Cannot parse {}: {} (expected YYYY-MM-DD)",
        name, s
    )))
}
