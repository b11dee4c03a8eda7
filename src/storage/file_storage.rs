//! Disk-backed [`Storage`]: each key is a `<key>.json` file in one directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::{check_quota, Storage};
use crate::types::errors::StorageError;

/// Storage that keeps each key as a file inside `dir`.
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<u64>,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P, quota: Option<u64>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            quota,
        }
    }

    /// Returns the file path backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        check_quota(self.quota, blob)?;

        fs::create_dir_all(&self.dir).map_err(|e| {
            StorageError::Io(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.path_for(key);
        fs::write(&path, blob)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path)
            .map_err(|e| StorageError::Io(format!("Failed to remove {}: {}", path.display(), e)))
    }

    fn set_quota(&mut self, quota: Option<u64>) {
        self.quota = quota;
    }
}
