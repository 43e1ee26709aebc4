use crate::core::persistence::{LoadOutcome, PersistenceAdapter};
use crate::domain::model::{AddRejection, ComparisonEntry, EntryId};
use crate::domain::ports::KeyValueStore;

/// Entries ordered by descending value. Equal values keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonList {
    entries: Vec<ComparisonEntry>,
}

impl ComparisonList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a list from a snapshot, re-establishing the ordering.
    pub fn from_entries(mut entries: Vec<ComparisonEntry>) -> Self {
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        Self { entries }
    }

    pub fn add(&mut self, model: &str, score: f64, price: f64) -> Result<ComparisonEntry, AddRejection> {
        validate(model, score, price)?;

        let entry = ComparisonEntry {
            id: EntryId::generate(),
            name: model.to_string(),
            score,
            price,
            value: ComparisonEntry::value_of(score, price),
        };
        let position = self.entries.partition_point(|existing| existing.value >= entry.value);
        self.entries.insert(position, entry.clone());
        Ok(entry)
    }

    /// Returns the removed entry, or `None` if the id is not present.
    pub fn remove(&mut self, id: &EntryId) -> Option<ComparisonEntry> {
        let position = self.entries.iter().position(|entry| &entry.id == id)?;
        Some(self.entries.remove(position))
    }

    pub fn get(&self, id: &EntryId) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Score and price must be positive and finite; NaN, zero, negatives and
/// infinities are all rejected. A price so small that the value overflows is
/// rejected too.
pub fn validate(model: &str, score: f64, price: f64) -> Result<(), AddRejection> {
    if model.trim().is_empty() {
        return Err(AddRejection::EmptyModel);
    }
    if !score.is_finite() || score <= 0.0 {
        return Err(AddRejection::InvalidScore);
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(AddRejection::InvalidPrice);
    }
    if !ComparisonEntry::value_of(score, price).is_finite() {
        return Err(AddRejection::InvalidPrice);
    }
    Ok(())
}

/// Owns the live list and writes it through to storage after every change.
pub struct ComparisonManager<S: KeyValueStore> {
    list: ComparisonList,
    persistence: PersistenceAdapter<S>,
}

impl<S: KeyValueStore> ComparisonManager<S> {
    /// Loads the stored list; anything unusable starts the session empty.
    pub fn open(persistence: PersistenceAdapter<S>) -> (Self, LoadOutcome) {
        let outcome = persistence.load();
        match &outcome {
            LoadOutcome::Empty => tracing::debug!("No stored list under '{}'", persistence.key()),
            LoadOutcome::Loaded(entries) => {
                tracing::debug!("Loaded {} stored entries", entries.len())
            }
            LoadOutcome::Migrated(entries) => tracing::warn!(
                "Read {} entries from the legacy layout, they will be rewritten on next change",
                entries.len()
            ),
            LoadOutcome::Reset { reason } => {
                tracing::warn!("Starting with an empty list: {}", reason)
            }
        }

        let list = ComparisonList::from_entries(outcome.clone().into_entries());
        (Self { list, persistence }, outcome)
    }

    pub fn add(&mut self, model: &str, score: f64, price: f64) -> Result<ComparisonEntry, AddRejection> {
        match self.list.add(model, score, price) {
            Ok(entry) => {
                tracing::info!("Added {} at {:.2} (value {:.3})", entry.name, entry.price, entry.value);
                self.persist();
                Ok(entry)
            }
            Err(rejection) => {
                tracing::debug!("Add rejected: {}", rejection);
                Err(rejection)
            }
        }
    }

    /// No-op when `id` is absent. Storage is only written when a row went away,
    /// so a stored list that could not be read is left untouched.
    pub fn remove(&mut self, id: &EntryId) -> Option<ComparisonEntry> {
        let removed = self.list.remove(id);
        match &removed {
            Some(entry) => {
                tracing::info!("Removed {} ({})", entry.name, entry.id);
                self.persist();
            }
            None => tracing::debug!("No entry with id {}", id),
        }
        removed
    }

    pub fn list(&self) -> &ComparisonList {
        &self.list
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(self.list.entries()) {
            tracing::warn!("Could not save the comparison list: {}", e);
        }
    }
}
