//! In-memory [`Storage`], shared between clones.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{check_quota, Storage};
use crate::types::errors::StorageError;

/// Storage held in a shared map. Clones see the same contents, so a test can
/// keep one handle while the history store owns another.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<u64>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: u64) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(quota),
        }
    }

    /// Stores `blob` directly, bypassing the quota. Used to seed fixtures.
    pub fn insert(&self, key: &str, blob: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.insert(key.to_string(), blob.to_string());
        }
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.entries.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        check_quota(self.quota, blob)?;
        let mut map = self.entries.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        map.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut map = self.entries.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        map.remove(key);
        Ok(())
    }

    fn set_quota(&mut self, quota: Option<u64>) {
        self.quota = quota;
    }
}
