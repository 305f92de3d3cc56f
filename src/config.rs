//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dataset::{DatasetLoader, DATE_COLUMN, DATE_FORMAT, REGION_COLUMN, SALES_COLUMN};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File this config was read from; `None` when only defaults and env apply
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Source dataset configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,

    #[serde(default = "default_date_column")]
    pub date_column: String,

    #[serde(default = "default_region_column")]
    pub region_column: String,

    #[serde(default = "default_sales_column")]
    pub sales_column: String,

    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_dataset_path() -> String {
    "data/sales_data.csv".to_string()
}

fn default_date_column() -> String {
    DATE_COLUMN.to_string()
}

fn default_region_column() -> String {
    REGION_COLUMN.to_string()
}

fn default_sales_column() -> String {
    SALES_COLUMN.to_string()
}

fn default_date_format() -> String {
    DATE_FORMAT.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            date_column: default_date_column(),
            region_column: default_region_column(),
            sales_column: default_sales_column(),
            date_format: default_date_format(),
        }
    }
}

impl DatasetConfig {
    /// Build a loader for the configured column names
    pub fn loader(&self) -> DatasetLoader {
        DatasetLoader::new()
            .with_date_column(&self.date_column)
            .with_region_column(&self.region_column)
            .with_sales_column(&self.sales_column)
            .with_date_format(&self.date_format)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_enable_export() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            enable_export: default_enable_export(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dashboard presentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Regions checked when the page first loads
    #[serde(default = "default_regions")]
    pub default_regions: Vec<String>,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Path the export links point at
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

fn default_regions() -> Vec<String> {
    vec!["North".to_string()]
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_export_path() -> String {
    "/api/v1/export".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_regions: default_regions(),
            currency_symbol: default_currency_symbol(),
            export_path: default_export_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.source = Some(path.to_path_buf());
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// The first existing file wins. A file that exists but cannot be read or
    /// parsed is an error, never silently skipped.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("salesboard").join("config.toml")),
            Some(PathBuf::from("/etc/salesboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths, |key| std::env::var(key).ok())
    }

    fn load_first(
        paths: &[PathBuf],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match paths.iter().find(|p| p.exists()) {
            Some(path) => {
                let mut config = Self::load(path)?;
                config.source = Some(path.clone());
                config
            }
            None => Config::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(path) = lookup("SALESBOARD_DATASET") {
            self.dataset.path = path;
        }

        if let Some(host) = lookup("SALESBOARD_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("SALESBOARD_API_PORT") {
            self.api.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "SALESBOARD_API_PORT".to_string(),
                value: port.clone(),
            })?;
        }

        if let Some(level) = lookup("SALESBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SALESBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Salesboard Configuration
#
# Environment variables override these settings:
# - SALESBOARD_DATASET
# - SALESBOARD_API_HOST
# - SALESBOARD_API_PORT
# - SALESBOARD_LOG_LEVEL
# - SALESBOARD_LOG_FORMAT

[dataset]
# CSV file with Date, Region and Sales columns
path = "data/sales_data.csv"

# Column names in the header row
date_column = "Date"
region_column = "Region"
sales_column = "Sales"

# Preferred date format (strftime); common alternatives are also accepted
date_format = "%Y-%m-%d"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8050

# Allowed CORS origins (empty = any)
cors_origins = []

# Enable the CSV export endpoint
enable_export = true

[dashboard]
# Regions selected on first load
default_regions = ["North"]

# Currency symbol for the summary block
currency_symbol = "$"

# Path export links point at
export_path = "/api/v1/export"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
