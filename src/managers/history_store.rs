//! History Store for qr-history.
//!
//! Implements `HistoryStoreTrait` as a bounded, chronologically ordered list of
//! generated QR codes with adjacent-duplicate suppression, persisted as one
//! JSON blob through a [`Storage`] backend after every mutation.

use tracing::{debug, info, warn};

use crate::storage::Storage;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Maximum number of entries kept; older ones are evicted first.
pub const MAX_HISTORY_ITEMS: usize = 50;

/// Storage key of the persisted history blob.
pub const HISTORY_KEY: &str = "qrHistorial";

/// Trait defining history store operations.
///
/// Positions passed to `remove_at` are display positions, i.e. indexes into
/// the sequence returned by `list`.
pub trait HistoryStoreTrait {
    fn append(&mut self, link: &str, image_data: &str) -> Result<bool, HistoryError>;
    fn list(&self) -> Vec<HistoryEntry>;
    fn remove_at(&mut self, index: usize) -> Result<HistoryEntry, HistoryError>;
    fn clear(&mut self) -> Result<(), HistoryError>;
    fn export(&self) -> Result<String, HistoryError>;
    fn last(&self) -> Option<&HistoryEntry>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// History store that owns its entries and writes them through to `storage`.
pub struct HistoryStore {
    storage: Box<dyn Storage>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Creates a store and loads whatever history `storage` already holds.
    ///
    /// A missing, unreadable or corrupt blob yields an empty history.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let entries = Self::load_entries(storage.as_ref());
        info!(entries = entries.len(), "history loaded");
        Self { storage, entries }
    }

    /// Applies a new storage quota to subsequent writes.
    pub fn set_quota(&mut self, quota: Option<u64>) {
        self.storage.set_quota(quota);
        info!(?quota, "history quota changed");
    }

    fn load_entries(storage: &dyn Storage) -> Vec<HistoryEntry> {
        let blob = match storage.load(HISTORY_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "history unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "history blob corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Appends a pre-built entry, applying dedup, eviction and persistence.
    ///
    /// Returns `false` when the entry repeats the last stored link.
    pub fn push_entry(&mut self, entry: HistoryEntry) -> Result<bool, HistoryError> {
        if self.entries.last().map(|e| e.link == entry.link).unwrap_or(false) {
            debug!(link = %entry.link, "skipping repeat of last history entry");
            return Ok(false);
        }

        let mut next = self.entries.clone();
        next.push(entry);
        if next.len() > MAX_HISTORY_ITEMS {
            let excess = next.len() - MAX_HISTORY_ITEMS;
            next.drain(..excess);
        }

        self.commit(next)?;
        Ok(true)
    }

    /// Storage indexes ordered newest first. Equal timestamps keep the later
    /// insertion in front.
    fn display_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            self.entries[b]
                .created_at
                .cmp(&self.entries[a].created_at)
                .then(b.cmp(&a))
        });
        order
    }

    /// Persists `next` and only then makes it the current state.
    fn commit(&mut self, next: Vec<HistoryEntry>) -> Result<(), HistoryError> {
        let blob = serde_json::to_string(&next)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
        self.storage.save(HISTORY_KEY, &blob)?;
        self.entries = next;
        Ok(())
    }
}

impl HistoryStoreTrait for HistoryStore {
    /// Records a generated QR code stamped with the current time.
    fn append(&mut self, link: &str, image_data: &str) -> Result<bool, HistoryError> {
        let stored = self.push_entry(HistoryEntry::new(link, image_data))?;
        if stored {
            info!(link, total = self.entries.len(), "history entry added");
        }
        Ok(stored)
    }

    /// Returns all entries, most recently created first.
    fn list(&self) -> Vec<HistoryEntry> {
        self.display_order()
            .into_iter()
            .map(|i| self.entries[i].clone())
            .collect()
    }

    /// Removes the entry shown at display position `index`.
    fn remove_at(&mut self, index: usize) -> Result<HistoryEntry, HistoryError> {
        let storage_index = *self
            .display_order()
            .get(index)
            .ok_or(HistoryError::InvalidIndex(index))?;

        let mut next = self.entries.clone();
        let removed = next.remove(storage_index);
        self.commit(next)?;

        info!(link = %removed.link, index, "history entry removed");
        Ok(removed)
    }

    /// Drops every entry and the persisted blob.
    fn clear(&mut self) -> Result<(), HistoryError> {
        self.storage.remove(HISTORY_KEY)?;
        self.entries.clear();
        info!("history cleared");
        Ok(())
    }

    /// Pretty-printed JSON of all entries in storage order.
    fn export(&self) -> Result<String, HistoryError> {
        if self.entries.is_empty() {
            return Err(HistoryError::EmptyHistory);
        }
        serde_json::to_string_pretty(&self.entries)
            .map_err(|e| HistoryError::Serialization(e.to_string()))
    }

    fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
