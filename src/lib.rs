//! # Salesboard
//!
//! Sales Dashboard - filter a sales dataset by region and date range and
//! serve aggregate charts, summary statistics and CSV exports.
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading and the read-only in-memory table
//! - [`engine`]: Filter, group-by and aggregate pass plus CSV export
//! - [`charts`]: Bar, line and pie chart specifications
//! - [`dashboard`]: Control defaults and per-interaction views
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salesboard::config::DashboardConfig;
//! use salesboard::dashboard::Dashboard;
//! use salesboard::dataset::DatasetLoader;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = DatasetLoader::new().load(Path::new("data/sales_data.csv"))?;
//!     let dashboard = Dashboard::new(Arc::new(dataset), DashboardConfig::default());
//!
//!     let controls = dashboard.controls();
//!     let criteria = dashboard.criteria(controls.default_regions, None, None);
//!     let view = dashboard.render(&criteria)?;
//!
//!     println!("{}", view.summary_text);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod engine;

// Re-export top-level types for convenience
pub use dataset::{Dataset, DatasetError, DatasetLoader, DatasetResult, DateRange, SalesRecord};

pub use engine::{compute, filter_records, Artifacts, FilterCriteria, SummaryStats};

pub use charts::{ChartDataset, ChartKind, ChartSpec};

pub use dashboard::{Controls, Dashboard, DashboardView};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    ApiConfig, Config, ConfigError, DashboardConfig, DatasetConfig, LoggingConfig,
};
