//! Key/value persistence for qr-history.
//!
//! The history is stored as one serialized blob under a single key, the way a
//! browser would keep it in local storage. [`Storage`] abstracts that medium
//! so the history store can run against disk or memory.
//!
//! # Usage
//!
//! ```no_run
//! use qr_history::storage::{FileStorage, MemoryStorage, Storage};
//!
//! // One JSON file per key under the given directory
//! let mut disk = FileStorage::new("/tmp/qr-history", None);
//! disk.save("qrHistorial", "[]").expect("write failed");
//!
//! // Or keep everything in memory for testing
//! let mem = MemoryStorage::new();
//! assert!(mem.load("qrHistorial").unwrap().is_none());
//! ```

pub mod file_storage;
pub mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

use crate::types::errors::StorageError;

/// A minimal string key/value store.
pub trait Storage: Send {
    /// Returns the blob stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Replaces the blob under `key`.
    fn save(&mut self, key: &str, blob: &str) -> Result<(), StorageError>;
    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    /// Replaces the byte limit applied to later saves; `None` removes it.
    fn set_quota(&mut self, quota: Option<u64>);
}

/// Rejects blobs larger than `quota` bytes.
pub(crate) fn check_quota(quota: Option<u64>, blob: &str) -> Result<(), StorageError> {
    match quota {
        Some(limit) if blob.len() as u64 > limit => Err(StorageError::QuotaExceeded {
            limit,
            attempted: blob.len() as u64,
        }),
        _ => Ok(()),
    }
}
