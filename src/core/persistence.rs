//! Snapshot encoding for the comparison list.
//!
//! The stored value is a versioned document:
//!
//! ```json
//! {"version": 1, "saved_at": "2026-10-15T09:30:00Z", "entries": [...]}
//! ```
//!
//! A bare JSON array of entries is the legacy layout written by the web
//! version of the tool. It is still read and is upgraded on the next save.

use crate::domain::model::ComparisonEntry;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{GpuValueError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_STORAGE_KEY: &str = "table";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedState {
    version: u32,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    entries: Vec<ComparisonEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResetReason {
    Unreadable(String),
    Malformed(String),
    UnsupportedVersion(u32),
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetReason::Unreadable(e) => write!(f, "storage could not be read: {}", e),
            ResetReason::Malformed(e) => write!(f, "stored list is malformed: {}", e),
            ResetReason::UnsupportedVersion(v) => write!(
                f,
                "stored list has version {} but only {} is supported",
                v, SCHEMA_VERSION
            ),
        }
    }
}

/// Result of reading the stored list.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing stored under the key yet.
    Empty,
    Loaded(Vec<ComparisonEntry>),
    /// Read from the legacy bare-array layout.
    Migrated(Vec<ComparisonEntry>),
    /// Stored data was unusable; the session starts from an empty list.
    Reset { reason: ResetReason },
}

impl LoadOutcome {
    pub fn into_entries(self) -> Vec<ComparisonEntry> {
        match self {
            LoadOutcome::Loaded(entries) | LoadOutcome::Migrated(entries) => entries,
            LoadOutcome::Empty | LoadOutcome::Reset { .. } => Vec::new(),
        }
    }
}

/// Refuses entries with non-finite numbers, which JSON would store as `null`.
pub fn encode(entries: &[ComparisonEntry]) -> Result<String> {
    if let Some(entry) = entries
        .iter()
        .find(|e| !(e.score.is_finite() && e.price.is_finite() && e.value.is_finite()))
    {
        return Err(GpuValueError::UnencodableEntry {
            id: entry.id.to_string(),
        });
    }

    let state = PersistedState {
        version: SCHEMA_VERSION,
        saved_at: Some(Utc::now()),
        entries: entries.to_vec(),
    };
    Ok(serde_json::to_string(&state)?)
}

pub fn decode(text: &str) -> LoadOutcome {
    let document: serde_json::Value = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(e) => {
            return LoadOutcome::Reset {
                reason: ResetReason::Malformed(e.to_string()),
            }
        }
    };

    match document {
        serde_json::Value::Array(_) => {
            match serde_json::from_value::<Vec<ComparisonEntry>>(document) {
                Ok(entries) => LoadOutcome::Migrated(retain_valid(entries)),
                Err(e) => LoadOutcome::Reset {
                    reason: ResetReason::Malformed(e.to_string()),
                },
            }
        }
        serde_json::Value::Object(_) => decode_versioned(document),
        other => LoadOutcome::Reset {
            reason: ResetReason::Malformed(format!("unexpected JSON value: {}", other)),
        },
    }
}

fn decode_versioned(document: serde_json::Value) -> LoadOutcome {
    match document.get("version").and_then(serde_json::Value::as_u64) {
        Some(v) if v > u64::from(SCHEMA_VERSION) => LoadOutcome::Reset {
            reason: ResetReason::UnsupportedVersion(u32::try_from(v).unwrap_or(u32::MAX)),
        },
        Some(_) => match serde_json::from_value::<PersistedState>(document) {
            Ok(state) => LoadOutcome::Loaded(retain_valid(state.entries)),
            Err(e) => LoadOutcome::Reset {
                reason: ResetReason::Malformed(e.to_string()),
            },
        },
        None => LoadOutcome::Reset {
            reason: ResetReason::Malformed("missing version".to_string()),
        },
    }
}

fn retain_valid(entries: Vec<ComparisonEntry>) -> Vec<ComparisonEntry> {
    entries
        .into_iter()
        .filter(|entry| {
            let usable = !entry.name.trim().is_empty()
                && entry.score.is_finite()
                && entry.score > 0.0
                && entry.price.is_finite()
                && entry.price > 0.0
                && entry.value.is_finite();
            if !usable {
                tracing::warn!("Dropping unusable stored entry '{}'", entry.id);
            }
            usable
        })
        .collect()
}

/// Reads and writes the list under one fixed key.
pub struct PersistenceAdapter<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces whatever is stored under the key.
    pub fn save(&self, entries: &[ComparisonEntry]) -> Result<()> {
        let text = encode(entries)?;
        self.store.set(&self.key, &text)?;
        tracing::debug!("Saved {} entries under '{}'", entries.len(), self.key);
        Ok(())
    }

    pub fn load(&self) -> LoadOutcome {
        match self.store.get(&self.key) {
            Ok(Some(text)) => decode(&text),
            Ok(None) => LoadOutcome::Empty,
            Err(e) => LoadOutcome::Reset {
                reason: ResetReason::Unreadable(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::domain::model::EntryId;

    fn entry(id: &str, name: &str, score: f64, price: f64) -> ComparisonEntry {
        ComparisonEntry {
            id: EntryId::from(id),
            name: name.to_string(),
            score,
            price,
            value: ComparisonEntry::value_of(score, price),
        }
    }

    #[test]
    fn test_missing_key_is_empty() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        assert_eq!(adapter.load(), LoadOutcome::Empty);
    }

    #[test]
    fn test_save_then_load_preserves_entries() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        let entries = vec![entry("a", "A", 200.0, 100.0), entry("b", "B", 100.0, 100.0)];
        adapter.save(&entries).unwrap();
        assert_eq!(adapter.load(), LoadOutcome::Loaded(entries));
    }

    #[test]
    fn test_saved_document_is_versioned() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::with_key(store.clone(), "gpus");
        adapter.save(&[entry("a", "A", 1.0, 1.0)]).unwrap();

        let raw = store.get("gpus").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 1);
        assert!(json["saved_at"].is_string());
        assert_eq!(json["entries"][0]["name"], "A");
    }

    #[test]
    fn test_non_finite_entry_is_not_written() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::new(store.clone());
        adapter.save(&[entry("a", "A", 100.0, 100.0)]).unwrap();

        let overflowing = ComparisonEntry {
            value: f64::INFINITY,
            ..entry("b", "B", 100.0, 1e-307)
        };
        let err = adapter.save(&[entry("a", "A", 100.0, 100.0), overflowing]).unwrap_err();
        assert!(matches!(err, GpuValueError::UnencodableEntry { ref id } if id == "b"));

        let entries = adapter.load().into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "A");
    }

    #[test]
    fn test_legacy_array_is_migrated() {
        let legacy = r#"[{"id":"0b6f","name":"RTX 3060","score":100,"price":150,"value":66.66666666666667}]"#;
        match decode(legacy) {
            LoadOutcome::Migrated(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].id.as_str(), "0b6f");
            }
            other => panic!("expected migration, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_resets() {
        assert!(matches!(
            decode("not json"),
            LoadOutcome::Reset {
                reason: ResetReason::Malformed(_)
            }
        ));
        assert!(matches!(decode("42"), LoadOutcome::Reset { .. }));
        assert!(matches!(decode(r#"{"entries": []}"#), LoadOutcome::Reset { .. }));
    }

    #[test]
    fn test_future_version_resets() {
        let text = r#"{"version": 7, "entries": []}"#;
        assert_eq!(
            decode(text),
            LoadOutcome::Reset {
                reason: ResetReason::UnsupportedVersion(7)
            }
        );
    }

    #[test]
    fn test_unusable_entries_are_dropped() {
        let text = r#"{"version": 1, "entries": [
            {"id":"a","name":"A","score":100,"price":0,"value":0},
            {"id":"b","name":"B","score":100,"price":100,"value":100}
        ]}"#;
        let entries = decode(text).into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "B");
    }

    #[test]
    fn test_reset_has_no_entries() {
        let outcome = LoadOutcome::Reset {
            reason: ResetReason::Unreadable("boom".to_string()),
        };
        assert!(outcome.into_entries().is_empty());
    }
}
