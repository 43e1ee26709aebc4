use serde::{Deserialize, Serialize};
use std::fmt;

/// A known GPU model and its benchmark score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub model: String,
    pub score: f64,
}

/// Opaque removal key for a comparison entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used when rendering the table.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the comparison table. Field names match the stored JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub id: EntryId,
    pub name: String,
    pub score: f64,
    pub price: f64,
    pub value: f64,
}

impl ComparisonEntry {
    /// `score / price * 100`
    pub fn value_of(score: f64, price: f64) -> f64 {
        score / price * 100.0
    }
}

/// Why an add request left the list untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRejection {
    EmptyModel,
    InvalidScore,
    InvalidPrice,
}

impl fmt::Display for AddRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            AddRejection::EmptyModel => "no model selected",
            AddRejection::InvalidScore => "the selected model has no usable benchmark score",
            AddRejection::InvalidPrice => "the price must be a positive number",
        };
        f.write_str(message)
    }
}

impl std::error::Error for AddRejection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn test_short_id_of_short_string() {
        let id = EntryId::from("abc");
        assert_eq!(id.short(), "abc");
    }

    #[test]
    fn test_entry_serializes_with_plain_string_id() {
        let entry = ComparisonEntry {
            id: EntryId::from("row-1"),
            name: "RTX 3060".to_string(),
            score: 100.0,
            price: 150.0,
            value: ComparisonEntry::value_of(100.0, 150.0),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "row-1");
        assert_eq!(json["name"], "RTX 3060");
    }
}
