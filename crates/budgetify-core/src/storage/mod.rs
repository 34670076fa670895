//! Persistence behind a pluggable store
//!
//! The engine only ever persists two collections, each as a JSON array under
//! a fixed key. Transactions are never persisted.
//!
//! # Architecture
//!
//! - `Store` trait defines the load/save contract
//! - `JsonFileStore` keeps one `<key>.json` file per key in a data directory
//! - `MemoryStore` keeps blobs in memory (tests and dry runs)

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key of the category collection
pub const CATEGORIES_KEY: &str = "budgetify-categories";

/// Key of the goal collection
pub const GOALS_KEY: &str = "budgetify-goals";

/// Key-value storage of JSON blobs
pub trait Store: Send + Sync {
    /// Human-readable name for this store
    fn name(&self) -> &str;

    /// Read the blob stored under `key`, `None` when nothing was ever saved
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the blob stored under `key`
    fn save(&self, key: &str, value: &Value) -> Result<()>;
}

/// Load a JSON array of records
///
/// Returns `None` when the key is absent, unreadable or does not hold an
/// array of `T`. Unreadable and malformed blobs are logged and otherwise
/// ignored; the caller decides what an empty slot means.
pub fn load_collection<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Option<Vec<T>> {
    let value = match store.load(key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            tracing::debug!(store = store.name(), key, "No stored data");
            return None;
        }
        Err(e) => {
            tracing::warn!(store = store.name(), key, "Failed to read stored data: {}", e);
            return None;
        }
    };

    match serde_json::from_value::<Vec<T>>(value) {
        Ok(items) => {
            tracing::debug!(store = store.name(), key, count = items.len(), "Loaded collection");
            Some(items)
        }
        Err(e) => {
            tracing::warn!(store = store.name(), key, "Ignoring malformed stored data: {}", e);
            None
        }
    }
}

/// Serialize `items` as a JSON array and save it under `key`
pub fn save_collection<T: Serialize>(store: &dyn Store, key: &str, items: &[T]) -> Result<()> {
    let value = serde_json::to_value(items)?;
    store.save(key, &value)?;
    tracing::debug!(store = store.name(), key, count = items.len(), "Saved collection");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;
    use serde_json::json;

    #[test]
    fn test_absent_key_is_none() {
        let store = MemoryStore::new();
        assert!(load_collection::<Goal>(&store, GOALS_KEY).is_none());
    }

    #[test]
    fn test_malformed_blob_is_none() {
        let store = MemoryStore::new();
        store.save(GOALS_KEY, &json!({"not": "an array"})).unwrap();
        assert!(load_collection::<Goal>(&store, GOALS_KEY).is_none());

        store.save(GOALS_KEY, &json!([{"name": 42}])).unwrap();
        assert!(load_collection::<Goal>(&store, GOALS_KEY).is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_collection(&store, "numbers", &[1, 2, 3]).unwrap();
        assert_eq!(load_collection::<i32>(&store, "numbers"), Some(vec![1, 2, 3]));
    }
}
