use std::path::PathBuf;
use std::sync::Arc;

use clarity_storage::error::StorageError;
use clarity_storage::local::LocalHistoryStore;
use tokio::sync::Mutex;

/// Shared application state, injected into all route handlers via Axum state.
///
/// The store does a read-modify-write per mutation, so handlers hold the
/// lock for the whole operation.
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<Mutex<LocalHistoryStore>>,
}

impl AppState {
    pub fn new(store: LocalHistoryStore) -> Self {
        Self {
            history: Arc::new(Mutex::new(store)),
        }
    }

    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(LocalHistoryStore::open(data_dir)?))
    }
}
