use crate::utils::error::Result;
use std::path::Path;

/// Durable string key-value storage, the terminal stand-in for browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &Path;
    fn storage_key(&self) -> &str;
    fn catalog_path(&self) -> Option<&Path>;
    fn value_precision(&self) -> usize;
    fn price_precision(&self) -> usize;
    fn currency(&self) -> &str;
}
