pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::Settings;

pub use adapters::storage::{LocalStorage, MemoryStore};
pub use app::{DisplayOptions, ExportFormat, ValueApp};
pub use crate::core::{
    catalog::BenchmarkCatalog,
    comparison::{ComparisonList, ComparisonManager},
    persistence::{LoadOutcome, PersistenceAdapter},
    selection::SelectionState,
};
pub use utils::error::{GpuValueError, Result};
