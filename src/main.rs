//! Salesboard
//!
//! Serves the sales dashboard API, or runs the same filter from the terminal.
//!
//! # Configuration
//!
//! Settings come from `--config`, then the default config locations, then
//! environment variables (`SALESBOARD_DATASET`, `SALESBOARD_API_HOST`,
//! `SALESBOARD_API_PORT`, `SALESBOARD_LOG_LEVEL`, `SALESBOARD_LOG_FORMAT`).
//! `RUST_LOG` takes precedence over the configured log level.

use anyhow::Context;
use clap::{Parser, Subcommand};
use salesboard::api::dto::parse_date_param;
use salesboard::api::{serve, AppState};
use salesboard::config::{generate_default_config, Config, LoggingConfig};
use salesboard::dashboard::Dashboard;
use salesboard::dataset::Dataset;
use salesboard::engine::{filter_records, to_csv, FilterCriteria};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "salesboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales dashboard: filter by region and date, chart the aggregates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sales CSV file, overriding the configured path
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server (default)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print per-region totals and the summary block
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the full dashboard view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the filtered records as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct FilterArgs {
    /// Regions to include, comma-separated (default: the dashboard's initial selection)
    #[arg(short, long, value_delimiter = ',')]
    pub regions: Vec<String>,
    /// Start date, YYYY-MM-DD (default: earliest date)
    #[arg(short, long)]
    pub start: Option<String>,
    /// End date, YYYY-MM-DD (default: latest date)
    #[arg(short, long)]
    pub end: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        return write_output(output.as_deref(), &generate_default_config());
    }

    let loaded = match &cli.config {
        Some(path) => Config::load_with_env(path),
        None => Config::load_default(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    if let Some(path) = &cli.dataset {
        config.dataset.path = path.to_string_lossy().to_string();
    }

    init_tracing(&config.logging);
    match &config.source {
        Some(path) => tracing::info!(path = %path.display(), "Loaded config"),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let dataset = Arc::new(load_dataset(&config)?);
    let dashboard = Dashboard::new(Arc::clone(&dataset), config.dashboard.clone());

    match cli.command {
        None => run_server(config, dataset, None, None).await,
        Some(Commands::Serve { host, port }) => run_server(config, dataset, host, port).await,
        Some(Commands::Summary { filter, json }) => {
            let criteria = build_criteria(&dashboard, filter)?;
            let view = dashboard.render(&criteria)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!(
                    "{} record(s), {} to {}",
                    view.row_count, view.criteria.start_date, view.criteria.end_date
                );
                for (region, total) in view
                    .bar_chart
                    .labels
                    .iter()
                    .zip(view.bar_chart.datasets[0].data.iter().flatten())
                {
                    println!("  {:<16} {:>14.2}", region, total);
                }
                println!();
                println!("{}", view.summary_text);
            }
            Ok(())
        }
        Some(Commands::Export { filter, output }) => {
            let criteria = build_criteria(&dashboard, filter)?;
            let records = filter_records(&dataset, &criteria);
            let csv = to_csv(dataset.columns(), &records)?;

            tracing::info!(rows = records.len(), "Exporting filtered records");
            write_output(output.as_deref(), &csv)
        }
        Some(Commands::Config { .. }) => Ok(()),
    }
}

/// Install the tracing subscriber on stderr, pretty or JSON per config
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("salesboard={},tower_http={}", logging.level, logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load the dataset once; any failure aborts startup
fn load_dataset(config: &Config) -> anyhow::Result<Dataset> {
    let path = Path::new(&config.dataset.path);

    config.dataset.loader().load(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to load sales dataset");
        anyhow::Error::new(e).context(format!("loading dataset {}", path.display()))
    })
}

fn build_criteria(dashboard: &Dashboard, filter: FilterArgs) -> anyhow::Result<FilterCriteria> {
    let start = parse_date_param("start", filter.start.as_deref())?;
    let end = parse_date_param("end", filter.end.as_deref())?;

    let regions = if filter.regions.is_empty() {
        dashboard.controls().default_regions
    } else {
        filter.regions
    };

    Ok(dashboard.criteria(regions, start, end))
}

async fn run_server(
    mut config: Config,
    dataset: Arc<Dataset>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.api.host = host;
    }
    if let Some(port) = port {
        config.api.port = port;
    }

    tracing::info!("Starting Salesboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        records = dataset.len(),
        regions = ?dataset.regions(),
        "Dataset ready"
    );

    let state = AppState::new(dataset, config.api.clone(), config.dashboard.clone());
    serve(state, &config.api).await?;

    tracing::info!("Salesboard stopped");
    Ok(())
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
