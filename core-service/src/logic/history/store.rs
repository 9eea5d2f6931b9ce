//! History Store - bounded, persisted log of completed checks
//!
//! Most recent first. Every mutation re-persists the full log under a single
//! storage key. Unreadable stored content is treated as an empty log.

use super::storage::{KeyValueStore, StorageError};
use super::types::CheckRecord;
use crate::constants::{HISTORY_STORAGE_KEY, MAX_HISTORY};

pub struct HistoryStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    records: Vec<CheckRecord>,
}

impl HistoryStore {
    /// Open the store and load whatever is persisted
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        Self::open_with_key(backend, HISTORY_STORAGE_KEY)
    }

    pub fn open_with_key(backend: Box<dyn KeyValueStore>, key: &str) -> Self {
        let mut store = Self {
            backend,
            key: key.to_string(),
            records: Vec::new(),
        };
        store.load();
        store
    }

    /// Re-read the log from storage. Never fails; bad content yields an empty log.
    pub fn load(&mut self) -> &[CheckRecord] {
        self.records = match self.read_persisted() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Failed to load history, starting empty: {}", e);
                Vec::new()
            }
        };

        tracing::debug!("History loaded: {} records", self.records.len());
        &self.records
    }

    /// Prepend a record, evict past the cap, persist
    pub fn append(&mut self, record: CheckRecord) -> &[CheckRecord] {
        self.records.insert(0, record);
        self.records.truncate(MAX_HISTORY);

        if let Err(e) = self.persist() {
            tracing::error!("Failed to persist history ({} records kept in memory): {}", self.records.len(), e);
        }

        &self.records
    }

    /// Remove the persisted key and empty the log.
    /// If the key cannot be removed the in-memory log is left as it was.
    pub fn clear(&mut self) -> Result<&[CheckRecord], StorageError> {
        if let Err(e) = self.backend.delete(&self.key) {
            tracing::error!("Failed to delete persisted history: {}", e);
            return Err(e);
        }

        self.records.clear();
        tracing::info!("History cleared");
        Ok(&self.records)
    }

    /// First `n` records, most recent first. Does not touch storage.
    pub fn export_recent(&self, n: usize) -> Vec<CheckRecord> {
        self.records.iter().take(n).cloned().collect()
    }

    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn read_persisted(&self) -> Result<Vec<CheckRecord>, StorageError> {
        match self.backend.get(&self.key)? {
            Some(raw) => {
                let mut records: Vec<CheckRecord> = serde_json::from_str(&raw)?;
                records.truncate(MAX_HISTORY);
                Ok(records)
            }
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.records)?;
        self.backend.set(&self.key, &json)
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("key", &self.key)
            .field("records", &self.records.len())
            .finish()
    }
}
