//! Presentation layer: routes user events into the selection state and the
//! comparison manager, and renders what they hold.

pub mod shell;
pub mod view;

use crate::core::catalog::BenchmarkCatalog;
use crate::core::comparison::ComparisonManager;
use crate::core::persistence::{LoadOutcome, PersistenceAdapter};
use crate::core::selection::SelectionState;
use crate::domain::model::{AddRejection, CatalogEntry, ComparisonEntry, EntryId};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{GpuValueError, Result};

pub use view::{DisplayOptions, ExportFormat};

pub struct ValueApp<S: KeyValueStore> {
    catalog: BenchmarkCatalog,
    selection: SelectionState,
    manager: ComparisonManager<S>,
    display: DisplayOptions,
    load_outcome: LoadOutcome,
}

impl<S: KeyValueStore> ValueApp<S> {
    /// Reads the stored list and takes ownership of the catalog.
    pub fn mount(
        catalog: BenchmarkCatalog,
        persistence: PersistenceAdapter<S>,
        display: DisplayOptions,
    ) -> Self {
        let (manager, load_outcome) = ComparisonManager::open(persistence);
        tracing::debug!(
            "Mounted with {} catalog models and {} stored entries",
            catalog.len(),
            manager.list().len()
        );
        Self {
            catalog,
            selection: SelectionState::new(),
            manager,
            display,
            load_outcome,
        }
    }

    pub fn catalog(&self) -> &BenchmarkCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn rows(&self) -> &[ComparisonEntry] {
        self.manager.list().entries()
    }

    /// Only catalog models can be selected; anything else leaves the selection as it was.
    pub fn on_model_selected(&mut self, model: &str) -> Result<CatalogEntry> {
        let entry = self
            .catalog
            .find(model)
            .cloned()
            .ok_or_else(|| GpuValueError::UnknownModel {
                model: model.trim().to_string(),
            })?;
        self.selection.select_entry(&entry);
        Ok(entry)
    }

    pub fn on_price_changed(&mut self, raw: &str) {
        self.selection.set_price(raw);
    }

    pub fn on_add_clicked(&mut self) -> std::result::Result<ComparisonEntry, AddRejection> {
        let model = self.selection.model().to_string();
        self.manager
            .add(&model, self.selection.score(), self.selection.price())
    }

    /// Accepts a full id or a unique prefix. `Ok(None)` means nothing matched.
    pub fn on_remove_clicked(&mut self, id: &str) -> Result<Option<ComparisonEntry>> {
        let id = self.resolve_id(id)?;
        Ok(self.manager.remove(&id))
    }

    pub fn resolve_id(&self, text: &str) -> Result<EntryId> {
        let text = text.trim();
        let exact = EntryId::from(text);
        if text.is_empty() || self.manager.list().get(&exact).is_some() {
            return Ok(exact);
        }

        let matches: Vec<&ComparisonEntry> = self
            .rows()
            .iter()
            .filter(|entry| entry.id.as_str().starts_with(text))
            .collect();
        match matches.as_slice() {
            [single] => Ok(single.id.clone()),
            [] => Ok(exact),
            many => Err(GpuValueError::AmbiguousEntryId {
                prefix: text.to_string(),
                matches: many.len(),
            }),
        }
    }

    pub fn render_table(&self) -> String {
        view::render_table(self.rows(), &self.display)
    }

    pub fn render_models(&self, query: &str) -> String {
        view::render_models(&self.catalog.search(query))
    }

    pub fn render_entry(&self, entry: &ComparisonEntry) -> String {
        format!(
            "Added {} ({}) at {}: value {}",
            entry.name,
            entry.id.short(),
            self.display.format_price(entry.price),
            self.display.format_value(entry.value)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;

    fn app_with(models: &[(&str, f64)]) -> ValueApp<MemoryStore> {
        let catalog = BenchmarkCatalog::from_entries(
            models
                .iter()
                .map(|(model, score)| CatalogEntry {
                    model: model.to_string(),
                    score: *score,
                })
                .collect(),
        );
        ValueApp::mount(
            catalog,
            PersistenceAdapter::new(MemoryStore::new()),
            DisplayOptions::default(),
        )
    }

    #[test]
    fn test_select_price_add() {
        let mut app = app_with(&[("RTX 3060", 100.0)]);
        app.on_model_selected("RTX 3060").unwrap();
        app.on_price_changed("150.00");
        let entry = app.on_add_clicked().unwrap();

        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.display().format_value(entry.value), "66.667");
        assert!(app.render_table().contains("66.667"));
    }

    #[test]
    fn test_add_without_selection_is_rejected() {
        let mut app = app_with(&[("RTX 3060", 100.0)]);
        app.on_price_changed("150");
        assert_eq!(app.on_add_clicked(), Err(AddRejection::EmptyModel));
        assert!(app.rows().is_empty());
    }

    #[test]
    fn test_blank_price_is_rejected() {
        let mut app = app_with(&[("RTX 3060", 100.0)]);
        app.on_model_selected("RTX 3060").unwrap();
        app.on_price_changed("");
        assert_eq!(app.on_add_clicked(), Err(AddRejection::InvalidPrice));
        assert!(app.rows().is_empty());
    }

    #[test]
    fn test_unknown_model_keeps_previous_selection() {
        let mut app = app_with(&[("RTX 3060", 100.0)]);
        app.on_model_selected("RTX 3060").unwrap();
        let err = app.on_model_selected("Voodoo 5").unwrap_err();
        assert!(matches!(err, GpuValueError::UnknownModel { .. }));
        assert_eq!(app.selection().model(), "RTX 3060");
    }

    #[test]
    fn test_remove_by_prefix() {
        let mut app = app_with(&[("A", 200.0), ("B", 100.0)]);
        app.on_model_selected("A").unwrap();
        app.on_price_changed("100");
        let a = app.on_add_clicked().unwrap();

        let removed = app.on_remove_clicked(a.id.short()).unwrap();
        assert_eq!(removed.map(|e| e.id), Some(a.id.clone()));
        assert_eq!(app.on_remove_clicked(a.id.as_str()).unwrap(), None);
    }

    #[test]
    fn test_ambiguous_prefix() {
        let store = MemoryStore::new();
        store
            .set(
                "table",
                r#"{"version": 1, "entries": [
                    {"id": "abc-1", "name": "A", "score": 200, "price": 100, "value": 200},
                    {"id": "abc-2", "name": "B", "score": 100, "price": 100, "value": 100}
                ]}"#,
            )
            .unwrap();
        let mut app = ValueApp::mount(
            BenchmarkCatalog::default(),
            PersistenceAdapter::new(store),
            DisplayOptions::default(),
        );
        assert!(matches!(app.load_outcome(), LoadOutcome::Loaded(_)));

        assert!(matches!(
            app.on_remove_clicked("abc"),
            Err(GpuValueError::AmbiguousEntryId { matches: 2, .. })
        ));
        assert_eq!(app.rows().len(), 2);

        let removed = app.on_remove_clicked("abc-1").unwrap();
        assert_eq!(removed.map(|e| e.name), Some("A".to_string()));
        assert_eq!(app.on_remove_clicked("").unwrap(), None);
        assert_eq!(app.rows().len(), 1);
    }
}
