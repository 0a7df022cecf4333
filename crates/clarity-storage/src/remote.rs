//! History backend over the Clarity REST API.
//!
//! | operation | request |
//! |---|---|
//! | history | `GET /patients/{id}/history` |
//! | save | `POST /patients/{id}/history` |
//! | update | `PUT /patients/{id}/history/{entry_id}` |
//! | delete | `DELETE /patients/{id}/history/{entry_id}` |
//!
//! `ureq` is blocking, so each call runs on the blocking pool. A non-2xx
//! status becomes [`StorageError::Request`] carrying the reason phrase.
//! Failures are returned as-is; nothing is retried. Ids are percent-encoded
//! as single path segments.

use std::time::Duration;

use clarity_core::models::PatientHistoryEntry;
use percent_encoding::utf8_percent_encode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use ureq::Agent;

use crate::error::StorageError;
use crate::kv::ESCAPED;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct RemoteHistoryStore {
    agent: Agent,
    base_url: String,
}

impl std::fmt::Debug for RemoteHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteHistoryStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

enum Verb {
    Get,
    Post(serde_json::Value),
    Put(serde_json::Value),
    Delete,
}

impl Verb {
    fn name(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post(_) => "POST",
            Verb::Put(_) => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl RemoteHistoryStore {
    pub fn new(base_url: &str) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_history(
        &self,
        patient_id: &str,
    ) -> Result<Vec<PatientHistoryEntry>, StorageError> {
        let history: Vec<PatientHistoryEntry> = self
            .request(Verb::Get, history_path(patient_id))
            .await?;
        debug!(patient_id, count = history.len(), "loaded remote history");
        Ok(history)
    }

    pub async fn save_entry(
        &self,
        patient_id: &str,
        entry: PatientHistoryEntry,
    ) -> Result<PatientHistoryEntry, StorageError> {
        let body = serde_json::to_value(&entry)?;
        let created: PatientHistoryEntry = self
            .request(Verb::Post(body), history_path(patient_id))
            .await?;
        info!(patient_id, entry_id = created.entry_id(), "history entry created remotely");
        Ok(created)
    }

    /// PUT the full entry. An entry without an id cannot address anything,
    /// so it is returned unchanged without a request.
    pub async fn update_entry(
        &self,
        patient_id: &str,
        entry: PatientHistoryEntry,
    ) -> Result<PatientHistoryEntry, StorageError> {
        let Some(entry_id) = entry.entry_id().map(str::to_string) else {
            debug!(patient_id, "update without id ignored");
            return Ok(entry);
        };
        let body = serde_json::to_value(&entry)?;
        let updated: PatientHistoryEntry = self
            .request(Verb::Put(body), entry_path(patient_id, &entry_id))
            .await?;
        info!(patient_id, entry_id = %entry_id, "history entry updated remotely");
        Ok(updated)
    }

    pub async fn delete_entry(&self, patient_id: &str, entry_id: &str) -> Result<(), StorageError> {
        self.send(Verb::Delete, entry_path(patient_id, entry_id))
            .await?;
        info!(patient_id, entry_id, "history entry deleted remotely");
        Ok(())
    }

    async fn request<T>(&self, verb: Verb, path: String) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = format!("{}{path}", self.base_url);
        tokio::task::spawn_blocking(move || {
            let mut response = call(&agent, verb, &url)?;
            response
                .body_mut()
                .read_json::<T>()
                .map_err(|e| StorageError::ResponseParse(e.to_string()))
        })
        .await
        .map_err(|e| StorageError::Join(e.to_string()))?
    }

    /// Like [`Self::request`] but ignores the response body.
    async fn send(&self, verb: Verb, path: String) -> Result<(), StorageError> {
        let agent = self.agent.clone();
        let url = format!("{}{path}", self.base_url);
        tokio::task::spawn_blocking(move || call(&agent, verb, &url).map(|_| ()))
            .await
            .map_err(|e| StorageError::Join(e.to_string()))?
    }
}

/// `/patients/{id}/history` with the id escaped as one path segment.
fn history_path(patient_id: &str) -> String {
    format!("/patients/{}/history", utf8_percent_encode(patient_id, ESCAPED))
}

fn entry_path(patient_id: &str, entry_id: &str) -> String {
    format!(
        "{}/{}",
        history_path(patient_id),
        utf8_percent_encode(entry_id, ESCAPED)
    )
}

fn call(
    agent: &Agent,
    verb: Verb,
    url: &str,
) -> Result<ureq::http::Response<ureq::Body>, StorageError> {
    let method = verb.name();
    let result = match verb {
        Verb::Get => agent.get(url).header("Accept", "application/json").call(),
        Verb::Post(body) => agent.post(url).send_json(&body),
        Verb::Put(body) => agent.put(url).send_json(&body),
        Verb::Delete => agent.delete(url).call(),
    };
    let response = result.map_err(|e| StorageError::Transport(e.to_string()))?;

    let status = response.status();
    debug!(method, url, status = status.as_u16(), "history api response");
    if !status.is_success() {
        return Err(StorageError::Request {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        });
    }
    Ok(response)
}
