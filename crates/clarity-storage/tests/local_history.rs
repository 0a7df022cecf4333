use std::sync::Arc;

use clarity_core::models::{EntryType, PatientHistoryEntry, SessionMetrics};
use clarity_core::storage_keys;
use clarity_storage::backend::{BackendKind, HistoryBackend};
use clarity_storage::error::StorageError;
use clarity_storage::kv::{KeyValueStore, MemoryStore};
use clarity_storage::local::LocalHistoryStore;

fn note(notes: &str) -> PatientHistoryEntry {
    PatientHistoryEntry::new("2023-06-15", EntryType::Session, notes)
}

#[tokio::test]
async fn empty_history_is_empty_not_error() {
    let store = LocalHistoryStore::in_memory();
    assert!(store.get_history("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn save_assigns_id_and_round_trips() {
    let store = LocalHistoryStore::in_memory();

    let saved = store.save_entry("p1", note("A")).await.unwrap();
    let id = saved.entry_id().expect("id assigned").to_string();
    assert!(id.starts_with('h'));

    let history = store.get_history("p1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].notes, "A");
    assert_eq!(history[0].entry_id(), Some(id.as_str()));

    let mut expected = note("A");
    expected.id = Some(id);
    assert_eq!(history[0], expected);
}

#[tokio::test]
async fn save_keeps_caller_id() {
    let store = LocalHistoryStore::in_memory();
    let mut entry = note("A");
    entry.id = Some("custom".to_string());

    let saved = store.save_entry("p1", entry).await.unwrap();
    assert_eq!(saved.entry_id(), Some("custom"));
}

#[tokio::test]
async fn sequential_saves_are_newest_first_with_distinct_ids() {
    let store = LocalHistoryStore::in_memory();
    let first = store.save_entry("p1", note("first")).await.unwrap();
    let second = store.save_entry("p1", note("second")).await.unwrap();

    assert_ne!(first.id, second.id);

    let history = store.get_history("p1").await.unwrap();
    let notes: Vec<&str> = history.iter().map(|e| e.notes.as_str()).collect();
    assert_eq!(notes, ["second", "first"]);
}

#[tokio::test]
async fn patients_do_not_share_collections() {
    let store = LocalHistoryStore::in_memory();
    store.save_entry("p1", note("one")).await.unwrap();
    store.save_entry("p2", note("two")).await.unwrap();

    assert_eq!(store.get_history("p1").await.unwrap()[0].notes, "one");
    assert_eq!(store.get_history("p2").await.unwrap()[0].notes, "two");
}

#[tokio::test]
async fn update_replaces_matching_entry_in_place() {
    let store = LocalHistoryStore::in_memory();
    let older = store.save_entry("p1", note("older")).await.unwrap();
    store.save_entry("p1", note("newer")).await.unwrap();

    let mut edited = older.clone();
    edited.homework = Some("Thought journal".to_string());
    edited.metrics = Some(SessionMetrics::new(50, 30).unwrap());
    let returned = store.update_entry("p1", edited.clone()).await.unwrap();
    assert_eq!(returned, edited);

    let history = store.get_history("p1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].notes, "newer");
    assert_eq!(history[1], edited);
}

#[tokio::test]
async fn update_of_unknown_entry_changes_nothing() {
    let store = LocalHistoryStore::in_memory();
    store.save_entry("p1", note("A")).await.unwrap();
    let before = store.get_history("p1").await.unwrap();

    let mut stranger = note("B");
    stranger.id = Some("h-missing".to_string());
    store.update_entry("p1", stranger).await.unwrap();

    store.update_entry("p1", note("no id")).await.unwrap();

    assert_eq!(store.get_history("p1").await.unwrap(), before);
}

#[tokio::test]
async fn delete_removes_only_match_and_keeps_order() {
    let store = LocalHistoryStore::in_memory();
    let a = store.save_entry("p1", note("a")).await.unwrap();
    let b = store.save_entry("p1", note("b")).await.unwrap();
    let c = store.save_entry("p1", note("c")).await.unwrap();

    store
        .delete_entry("p1", b.entry_id().unwrap())
        .await
        .unwrap();

    let history = store.get_history("p1").await.unwrap();
    let ids: Vec<_> = history.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, [c.id, a.id]);
}

#[tokio::test]
async fn delete_of_unknown_id_is_noop() {
    let store = LocalHistoryStore::in_memory();
    store.save_entry("p1", note("a")).await.unwrap();
    let before = store.get_history("p1").await.unwrap();

    store.delete_entry("p1", "h0").await.unwrap();
    store.delete_entry("p9", "h0").await.unwrap();

    assert_eq!(store.get_history("p1").await.unwrap(), before);
    assert!(!store.remove("p1", "h0").unwrap());
}

#[tokio::test]
async fn replace_and_remove_report_matches() {
    let store = LocalHistoryStore::in_memory();
    let saved = store.save_entry("p1", note("a")).await.unwrap();

    assert!(store.replace("p1", &saved).unwrap());
    assert!(store.remove("p1", saved.entry_id().unwrap()).unwrap());
    assert!(!store.remove("p1", saved.entry_id().unwrap()).unwrap());
}

#[tokio::test]
async fn stored_document_is_newest_first_json_array() {
    let kv = Arc::new(MemoryStore::new());
    let store = LocalHistoryStore::new(kv.clone());
    store.save_entry("p1", note("first")).await.unwrap();
    store.save_entry("p1", note("second")).await.unwrap();

    let raw = kv
        .get(&storage_keys::patient_history("p1"))
        .unwrap()
        .expect("collection written");
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["notes"], "second");
    assert_eq!(json[1]["notes"], "first");
    assert_eq!(json[0]["type"], "Session");
}

#[tokio::test]
async fn corrupt_collection_surfaces_serialization_error() {
    let kv = Arc::new(MemoryStore::new());
    kv.set(&storage_keys::patient_history("p1"), "{not json")
        .unwrap();
    let store = LocalHistoryStore::new(kv);

    assert!(matches!(
        store.get_history("p1").await,
        Err(StorageError::Serialization(_))
    ));
}

#[tokio::test]
async fn file_backed_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = LocalHistoryStore::open(dir.path()).unwrap();
        store.save_entry("p1", note("persisted")).await.unwrap();
    }

    let reopened = LocalHistoryStore::open(dir.path()).unwrap();
    let history = reopened.get_history("p1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].notes, "persisted");
}

#[tokio::test]
async fn file_store_accepts_any_patient_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalHistoryStore::open(dir.path()).unwrap();

    let ids = ["patient 42", "jane@clinic.org", "ward/7", "../p1"];
    for id in ids {
        assert!(store.get_history(id).await.unwrap().is_empty(), "{id:?}");
        store.save_entry(id, note(id)).await.unwrap();
    }

    let reopened = LocalHistoryStore::open(dir.path()).unwrap();
    for id in ids {
        let history = reopened.get_history(id).await.unwrap();
        assert_eq!(history.len(), 1, "{id:?}");
        assert_eq!(history[0].notes, id);
    }
}

#[tokio::test]
async fn backend_variant_delegates_to_local_store() {
    let backend = HistoryBackend::Local(LocalHistoryStore::in_memory());
    assert_eq!(backend.kind(), BackendKind::Local);

    let saved = backend.save_entry("p1", note("A")).await.unwrap();
    let mut edited = saved.clone();
    edited.notes = "A, revised".to_string();
    backend.update_entry("p1", edited).await.unwrap();

    let history = backend.get_history("p1").await.unwrap();
    assert_eq!(history[0].notes, "A, revised");

    backend
        .delete_entry("p1", saved.entry_id().unwrap())
        .await
        .unwrap();
    assert!(backend.get_history("p1").await.unwrap().is_empty());
}

/// Records the thread every store call runs on.
struct ThreadRecorder {
    inner: MemoryStore,
    threads: std::sync::Mutex<Vec<std::thread::ThreadId>>,
}

impl ThreadRecorder {
    fn record(&self) {
        self.threads
            .lock()
            .unwrap()
            .push(std::thread::current().id());
    }
}

impl KeyValueStore for ThreadRecorder {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.record();
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.record();
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.record();
        self.inner.remove(key)
    }
}

#[tokio::test]
async fn store_io_runs_off_the_runtime_thread() {
    let kv = Arc::new(ThreadRecorder {
        inner: MemoryStore::new(),
        threads: std::sync::Mutex::new(Vec::new()),
    });
    let store = LocalHistoryStore::new(kv.clone());

    let saved = store.save_entry("p1", note("a")).await.unwrap();
    store.update_entry("p1", saved.clone()).await.unwrap();
    store.get_history("p1").await.unwrap();
    store
        .delete_entry("p1", saved.entry_id().unwrap())
        .await
        .unwrap();

    let runtime_thread = std::thread::current().id();
    let threads = kv.threads.lock().unwrap();
    assert!(!threads.is_empty());
    assert!(threads.iter().all(|id| *id != runtime_thread));
}
