use super::toml_config::TomlConfig;
use super::Settings;
use crate::app::ExportFormat;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "gpu-value")]
#[command(about = "Compare used graphics cards by benchmark score per dollar")]
pub struct CliConfig {
    /// Directory holding the saved comparison table [default: ./.gpu-value]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage key the table is saved under [default: table]
    #[arg(long, global = true)]
    pub storage_key: Option<String>,

    /// External benchmark dataset (.json or .csv) instead of the bundled one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List catalog models, optionally filtered by a search string
    Models { query: Option<String> },
    /// Add a GPU listing to the table
    Add {
        #[arg(short, long)]
        model: String,
        #[arg(short, long)]
        price: String,
    },
    /// Delete a row by id or unique id prefix
    Remove { id: String },
    /// Show the table
    List,
    /// Write the table as CSV or TSV
    Export {
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive session
    Shell,
}

impl CliConfig {
    /// Reads and checks the TOML file if one was given, then applies flag overrides.
    pub fn settings(&self) -> Result<Settings> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate_config()?;
                file_config
            }
            None => TomlConfig::default(),
        };

        let mut settings = Settings::from_toml(&file_config);
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(key) = &self.storage_key {
            settings.storage_key = key.clone();
        }
        if let Some(path) = &self.catalog {
            settings.catalog_path = Some(path.clone());
        }
        Ok(settings)
    }
}
