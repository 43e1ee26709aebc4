pub mod catalog;
pub mod comparison;
pub mod persistence;
pub mod selection;

pub use crate::domain::model::{AddRejection, CatalogEntry, ComparisonEntry, EntryId};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore};
pub use crate::utils::error::Result;
