use crate::domain::model::AddRejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpuValueError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Entry '{id}' has a non-finite score, price or value")]
    UnencodableEntry { id: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Unknown GPU model: {model}")]
    UnknownModel { model: String },

    #[error("GPU was not added: {0}")]
    Rejected(AddRejection),

    #[error("Id prefix '{prefix}' matches {matches} entries")]
    AmbiguousEntryId { prefix: String, matches: usize },
}

pub type Result<T> = std::result::Result<T, GpuValueError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl From<AddRejection> for GpuValueError {
    fn from(rejection: AddRejection) -> Self {
        GpuValueError::Rejected(rejection)
    }
}

impl GpuValueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GpuValueError::ConfigError { .. }
            | GpuValueError::ConfigValidationError { .. }
            | GpuValueError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GpuValueError::UnknownModel { .. }
            | GpuValueError::Rejected(_)
            | GpuValueError::AmbiguousEntryId { .. } => ErrorCategory::Input,
            GpuValueError::IoError(_) => ErrorCategory::Storage,
            GpuValueError::SerializationError(_)
            | GpuValueError::CsvError(_)
            | GpuValueError::UnencodableEntry { .. }
            | GpuValueError::CatalogError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GpuValueError::UnknownModel { .. }
            | GpuValueError::Rejected(_)
            | GpuValueError::AmbiguousEntryId { .. } => ErrorSeverity::Medium,
            GpuValueError::ConfigError { .. }
            | GpuValueError::ConfigValidationError { .. }
            | GpuValueError::InvalidConfigValueError { .. }
            | GpuValueError::CatalogError { .. }
            | GpuValueError::UnencodableEntry { .. }
            | GpuValueError::CsvError(_) => ErrorSeverity::High,
            GpuValueError::IoError(_) | GpuValueError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GpuValueError::UnknownModel { model } => {
                format!("'{}' is not a model in the benchmark catalog", model)
            }
            GpuValueError::Rejected(rejection) => rejection.to_string(),
            GpuValueError::AmbiguousEntryId { prefix, matches } => format!(
                "'{}' matches {} GPUs in the table, type more of the id",
                prefix, matches
            ),
            GpuValueError::IoError(e) => format!("Could not access a file: {}", e),
            GpuValueError::CatalogError { message } => {
                format!("The benchmark catalog could not be read: {}", message)
            }
            other if other.category() == ErrorCategory::Configuration => {
                format!("Configuration problem: {}", other)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command-line flags and the TOML configuration file"
            }
            ErrorCategory::Input => match self {
                GpuValueError::UnknownModel { .. } => {
                    "Run `gpu-value models <search>` to find the exact model name"
                }
                GpuValueError::Rejected(_) => "Enter a positive price such as 150.00",
                _ => "Run `gpu-value list` to see the current ids",
            },
            ErrorCategory::Storage => "Check that the data directory exists and is writable",
            ErrorCategory::Data => match self {
                GpuValueError::UnencodableEntry { .. } => {
                    "Remove the entry and add it again with a realistic price"
                }
                _ => "Check that the catalog file is valid JSON or CSV",
            },
        }
    }
}
