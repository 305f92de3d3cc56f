//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{ApiConfig, DashboardConfig};
use crate::dashboard::Dashboard;
use crate::dataset::Dataset;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dashboard over the read-only dataset
    pub dashboard: Arc<Dashboard>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: ApiConfig, dashboard: DashboardConfig) -> Self {
        Self {
            dashboard: Arc::new(Dashboard::new(dataset, dashboard)),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn dataset(&self) -> &Dataset {
        self.dashboard.dataset()
    }
}
