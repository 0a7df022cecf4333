use axum::Json;
use axum::extract::{Path, State};

use clarity_core::models::PatientHistoryEntry;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_history(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<PatientHistoryEntry>>, ApiError> {
    let store = state.history.lock().await;
    let history = store.get_history(&patient_id).await?;
    Ok(Json(history))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Json(entry): Json<PatientHistoryEntry>,
) -> Result<Json<PatientHistoryEntry>, ApiError> {
    entry.validate()?;
    let store = state.history.lock().await;
    let saved = store.save_entry(&patient_id, entry).await?;
    Ok(Json(saved))
}

/// The path id wins over any id in the body. An unknown id leaves the
/// collection untouched and still answers with the entry, as the local
/// backend does.
pub async fn update_entry(
    State(state): State<AppState>,
    Path((patient_id, entry_id)): Path<(String, String)>,
    Json(mut entry): Json<PatientHistoryEntry>,
) -> Result<Json<PatientHistoryEntry>, ApiError> {
    entry.validate()?;
    entry.id = Some(entry_id);

    let store = state.history.lock().await;
    let updated = store.update_entry(&patient_id, entry).await?;
    Ok(Json(updated))
}

/// Deleting an absent entry succeeds.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path((patient_id, entry_id)): Path<(String, String)>,
) -> Result<Json<()>, ApiError> {
    let store = state.history.lock().await;
    store.delete_entry(&patient_id, &entry_id).await?;
    Ok(Json(()))
}
