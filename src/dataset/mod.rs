//! Sales Dataset Store
//!
//! Loads the static sales table once and exposes it read-only:
//!
//! - **types**: Core data structures (SalesRecord, Dataset, DateRange)
//! - **loader**: CSV loading with configurable column names
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use salesboard::dataset::DatasetLoader;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = DatasetLoader::new().load(Path::new("data/sales_data.csv"))?;
//!     println!("{} records across {:?}", dataset.len(), dataset.regions());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{load, DatasetLoader};
pub use types::{
    ColumnKind, ColumnSpec, Dataset, DateRange, SalesRecord, DATE_COLUMN, DATE_FORMAT,
    REGION_COLUMN, SALES_COLUMN,
};
