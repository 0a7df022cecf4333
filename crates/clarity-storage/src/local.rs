//! History backend over a [`KeyValueStore`].
//!
//! Each patient's collection lives under one key as a JSON array, stored
//! newest-first. Every mutation reads the whole collection, changes it, and
//! writes it back. The async operations run store I/O on tokio's blocking
//! pool. There is no cross-writer coordination: callers sharing a
//! store across tasks must serialise access themselves.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use clarity_core::models::PatientHistoryEntry;
use clarity_core::storage_keys;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::kv::{FileStore, KeyValueStore, MemoryStore};

pub struct LocalHistoryStore {
    store: Arc<dyn KeyValueStore>,
    last_id_millis: AtomicI64,
}

impl fmt::Debug for LocalHistoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalHistoryStore").finish_non_exhaustive()
    }
}

impl LocalHistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            last_id_millis: AtomicI64::new(0),
        }
    }

    /// Backed by JSON files under `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(FileStore::open(dir)?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub async fn get_history(
        &self,
        patient_id: &str,
    ) -> Result<Vec<PatientHistoryEntry>, StorageError> {
        let owned = patient_id.to_string();
        let history = self.blocking(move |store| load(store, &owned)).await?;
        debug!(patient_id, count = history.len(), "loaded local history");
        Ok(history)
    }

    /// Persist a new entry at the front of the collection, assigning an id
    /// if it has none.
    pub async fn save_entry(
        &self,
        patient_id: &str,
        mut entry: PatientHistoryEntry,
    ) -> Result<PatientHistoryEntry, StorageError> {
        if !entry.has_id() {
            entry.id = Some(self.next_entry_id());
        }

        let owned = patient_id.to_string();
        let stored = entry.clone();
        self.blocking(move |store| {
            let mut history = load(store, &owned)?;
            history.insert(0, stored);
            store_all(store, &owned, &history)
        })
        .await?;

        info!(patient_id, entry_id = entry.entry_id(), "history entry saved");
        Ok(entry)
    }

    /// Replace the entry with the same id. A missing match leaves the
    /// collection untouched and is not an error.
    pub async fn update_entry(
        &self,
        patient_id: &str,
        entry: PatientHistoryEntry,
    ) -> Result<PatientHistoryEntry, StorageError> {
        let owned = patient_id.to_string();
        let replacement = entry.clone();
        self.blocking(move |store| replace(store, &owned, &replacement))
            .await?;
        Ok(entry)
    }

    /// Remove the entry with `entry_id` if present.
    pub async fn delete_entry(&self, patient_id: &str, entry_id: &str) -> Result<(), StorageError> {
        let owned = patient_id.to_string();
        let entry_id = entry_id.to_string();
        self.blocking(move |store| remove(store, &owned, &entry_id))
            .await?;
        Ok(())
    }

    /// Replace in place, reporting whether an entry matched. Blocks on the
    /// underlying store.
    pub fn replace(&self, patient_id: &str, entry: &PatientHistoryEntry) -> Result<bool, StorageError> {
        replace(self.store.as_ref(), patient_id, entry)
    }

    /// Remove by id, reporting whether anything was removed. Blocks on the
    /// underlying store.
    pub fn remove(&self, patient_id: &str, entry_id: &str) -> Result<bool, StorageError> {
        remove(self.store.as_ref(), patient_id, entry_id)
    }

    /// Run store I/O on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn KeyValueStore) -> Result<T, StorageError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| StorageError::Join(e.to_string()))?
    }

    /// `h{unix millis}`, bumped past the last id this store issued so
    /// back-to-back saves stay distinct.
    fn next_entry_id(&self) -> String {
        let now = jiff::Timestamp::now().as_millisecond();
        let previous = self
            .last_id_millis
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        format!("h{}", now.max(previous + 1))
    }
}

fn load(store: &dyn KeyValueStore, patient_id: &str) -> Result<Vec<PatientHistoryEntry>, StorageError> {
    let key = storage_keys::patient_history(patient_id);
    match store.get(&key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

fn store_all(
    store: &dyn KeyValueStore,
    patient_id: &str,
    history: &[PatientHistoryEntry],
) -> Result<(), StorageError> {
    let key = storage_keys::patient_history(patient_id);
    let body = serde_json::to_string(history)?;
    store.set(&key, &body)
}

fn replace(
    store: &dyn KeyValueStore,
    patient_id: &str,
    entry: &PatientHistoryEntry,
) -> Result<bool, StorageError> {
    let Some(entry_id) = entry.entry_id() else {
        debug!(patient_id, "update without id ignored");
        return Ok(false);
    };

    let mut history = load(store, patient_id)?;
    let Some(slot) = history.iter_mut().find(|e| e.entry_id() == Some(entry_id)) else {
        debug!(patient_id, entry_id, "update for unknown entry ignored");
        return Ok(false);
    };
    *slot = entry.clone();
    store_all(store, patient_id, &history)?;

    info!(patient_id, entry_id, "history entry updated");
    Ok(true)
}

fn remove(store: &dyn KeyValueStore, patient_id: &str, entry_id: &str) -> Result<bool, StorageError> {
    let mut history = load(store, patient_id)?;
    let before = history.len();
    history.retain(|e| e.entry_id() != Some(entry_id));
    if history.len() == before {
        debug!(patient_id, entry_id, "delete for unknown entry ignored");
        return Ok(false);
    }
    store_all(store, patient_id, &history)?;

    info!(patient_id, entry_id, "history entry deleted");
    Ok(true)
}
