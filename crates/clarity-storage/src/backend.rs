use clarity_core::models::PatientHistoryEntry;
use serde::Serialize;

use crate::error::StorageError;
use crate::local::LocalHistoryStore;
use crate::remote::RemoteHistoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Local,
    Remote,
}

/// The history backend chosen at construction. Both variants honour the
/// same contract; callers never branch on which one is in use.
#[derive(Debug)]
pub enum HistoryBackend {
    Local(LocalHistoryStore),
    Remote(RemoteHistoryStore),
}

impl HistoryBackend {
    pub fn kind(&self) -> BackendKind {
        match self {
            HistoryBackend::Local(_) => BackendKind::Local,
            HistoryBackend::Remote(_) => BackendKind::Remote,
        }
    }

    pub async fn get_history(
        &self,
        patient_id: &str,
    ) -> Result<Vec<PatientHistoryEntry>, StorageError> {
        match self {
            HistoryBackend::Local(store) => store.get_history(patient_id).await,
            HistoryBackend::Remote(store) => store.get_history(patient_id).await,
        }
    }

    pub async fn save_entry(
        &self,
        patient_id: &str,
        entry: PatientHistoryEntry,
    ) -> Result<PatientHistoryEntry, StorageError> {
        match self {
            HistoryBackend::Local(store) => store.save_entry(patient_id, entry).await,
            HistoryBackend::Remote(store) => store.save_entry(patient_id, entry).await,
        }
    }

    pub async fn update_entry(
        &self,
        patient_id: &str,
        entry: PatientHistoryEntry,
    ) -> Result<PatientHistoryEntry, StorageError> {
        match self {
            HistoryBackend::Local(store) => store.update_entry(patient_id, entry).await,
            HistoryBackend::Remote(store) => store.update_entry(patient_id, entry).await,
        }
    }

    pub async fn delete_entry(&self, patient_id: &str, entry_id: &str) -> Result<(), StorageError> {
        match self {
            HistoryBackend::Local(store) => store.delete_entry(patient_id, entry_id).await,
            HistoryBackend::Remote(store) => store.delete_entry(patient_id, entry_id).await,
        }
    }
}
