use crate::domain::model::CatalogEntry;
use crate::utils::error::{GpuValueError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

const BUNDLED_DATASET: &str = include_str!("../../data/gpu_data.json");

/// One record of a UserBenchmark-style export. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Benchmark")]
    pub benchmark: f64,
}

/// Immutable model -> score table, in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkCatalog {
    entries: Vec<CatalogEntry>,
}

impl BenchmarkCatalog {
    /// The dataset compiled into the binary.
    pub fn load() -> Self {
        match Self::from_json_str(BUNDLED_DATASET) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("Bundled benchmark dataset is unreadable: {}", e);
                Self::default()
            }
        }
    }

    /// Builds a catalog from raw records.
    ///
    /// Records without a positive, finite score or with a blank name are
    /// dropped. When a model name repeats, the first record wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BenchmarkRecord>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for record in records {
            let model = record.model.trim().to_string();
            if model.is_empty() || !record.benchmark.is_finite() || record.benchmark <= 0.0 {
                tracing::warn!(
                    "Skipping catalog record '{}' with score {}",
                    model,
                    record.benchmark
                );
                continue;
            }
            if !seen.insert(model.to_lowercase()) {
                tracing::debug!("Skipping duplicate catalog model '{}'", model);
                continue;
            }
            entries.push(CatalogEntry {
                model,
                score: record.benchmark,
            });
        }

        Self { entries }
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self::from_records(entries.into_iter().map(|e| BenchmarkRecord {
            model: e.model,
            benchmark: e.score,
        }))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: Vec<BenchmarkRecord> = serde_json::from_str(content)?;
        Ok(Self::from_records(records))
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = csv_reader
            .deserialize::<BenchmarkRecord>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
        Ok(Self::from_records(records))
    }

    /// Loads an external dataset, picking the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let catalog = match extension.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            Some("csv") => Self::from_csv_reader(std::fs::File::open(path)?)?,
            _ => {
                return Err(GpuValueError::CatalogError {
                    message: format!("{} is neither a .json nor a .csv file", path.display()),
                })
            }
        };

        if catalog.is_empty() {
            return Err(GpuValueError::CatalogError {
                message: format!("{} contains no usable models", path.display()),
            });
        }

        tracing::debug!("Loaded {} models from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-insensitive lookup.
    pub fn find(&self, model: &str) -> Option<&CatalogEntry> {
        let wanted = model.trim();
        self.entries
            .iter()
            .find(|entry| entry.model.eq_ignore_ascii_case(wanted))
    }

    /// Case-insensitive substring search; an empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| needle.is_empty() || entry.model.to_lowercase().contains(&needle))
            .collect()
    }
}
