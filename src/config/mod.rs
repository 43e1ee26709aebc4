#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::app::DisplayOptions;
use crate::core::persistence::DEFAULT_STORAGE_KEY;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_DIR: &str = "./.gpu-value";

/// Fully resolved settings: CLI flag, then TOML value, then default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub catalog_path: Option<PathBuf>,
    pub value_precision: usize,
    pub price_precision: usize,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        let display = DisplayOptions::default();
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            catalog_path: None,
            value_precision: display.value_precision,
            price_precision: display.price_precision,
            currency: display.currency,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: config.storage.dir.clone().unwrap_or(defaults.data_dir),
            storage_key: config.storage.key.clone().unwrap_or(defaults.storage_key),
            catalog_path: config.catalog.path.clone(),
            value_precision: config.display.value_precision.unwrap_or(defaults.value_precision),
            price_precision: config.display.price_precision.unwrap_or(defaults.price_precision),
            currency: config.display.currency.clone().unwrap_or(defaults.currency),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_storage_key("storage_key", &self.storage_key)?;
        if let Some(path) = &self.catalog_path {
            validation::validate_path("catalog", path)?;
            validation::validate_file_extension("catalog", path, &["json", "csv"])?;
        }
        validation::validate_range("value_precision", self.value_precision, 0, 6)?;
        validation::validate_range("price_precision", self.price_precision, 0, 6)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    fn value_precision(&self) -> usize {
        self.value_precision
    }

    fn price_precision(&self) -> usize {
        self.price_precision
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}
