//! In-memory store

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::Store;
use crate::error::{Error, Result};

/// Store that keeps blobs in a map; nothing outlives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently holding a blob
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .blobs
            .lock()
            .map(|b| b.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl Store for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, key: &str) -> Result<Option<Value>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| Error::InvalidData("memory store lock poisoned".into()))?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| Error::InvalidData("memory store lock poisoned".into()))?;
        blobs.insert(key.to_string(), value.clone());
        Ok(())
    }
}
