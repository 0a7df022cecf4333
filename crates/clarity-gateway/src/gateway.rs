use clarity_assistant::analysis::{self, HistoryAnalysis};
use clarity_assistant::chat::ChatProvider;
use clarity_assistant::insights;
use clarity_assistant::rehearsal::{self, TherapyApproach};
use clarity_core::models::{Patient, PatientHistoryEntry, sort_newest_first};
use clarity_storage::backend::{BackendKind, HistoryBackend};
use clarity_storage::local::LocalHistoryStore;
use clarity_storage::remote::RemoteHistoryStore;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// Patient history and assistant operations over one backend and one
/// collaborator, both fixed at construction.
#[derive(Debug)]
pub struct PatientDataGateway<P> {
    backend: HistoryBackend,
    assistant: P,
}

impl<P: ChatProvider> PatientDataGateway<P> {
    /// Open the backend `config` selects. Remote failures are never retried
    /// against the local store.
    pub fn new(config: &GatewayConfig, assistant: P) -> Result<Self, GatewayError> {
        let backend = match config.remote_url() {
            Some(url) => HistoryBackend::Remote(RemoteHistoryStore::new(url)),
            None => HistoryBackend::Local(LocalHistoryStore::open(config.data_dir.clone())?),
        };
        info!(backend = ?backend.kind(), "patient data gateway ready");
        Ok(Self::from_parts(backend, assistant))
    }

    pub fn from_parts(backend: HistoryBackend, assistant: P) -> Self {
        Self { backend, assistant }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn assistant(&self) -> &P {
        &self.assistant
    }

    /// History in stored order, which is newest-first for entries this
    /// gateway saved.
    pub async fn get_history(
        &self,
        patient_id: &str,
    ) -> Result<Vec<PatientHistoryEntry>, GatewayError> {
        Ok(self.backend.get_history(patient_id).await?)
    }

    /// History sorted newest-first by date, for display.
    pub async fn display_history(
        &self,
        patient_id: &str,
    ) -> Result<Vec<PatientHistoryEntry>, GatewayError> {
        let mut history = self.get_history(patient_id).await?;
        sort_newest_first(&mut history);
        Ok(history)
    }

    pub async fn save_entry(
        &self,
        patient_id: &str,
        entry: PatientHistoryEntry,
    ) -> Result<PatientHistoryEntry, GatewayError> {
        Ok(self.backend.save_entry(patient_id, entry).await?)
    }

    pub async fn update_entry(
        &self,
        patient_id: &str,
        entry: PatientHistoryEntry,
    ) -> Result<PatientHistoryEntry, GatewayError> {
        Ok(self.backend.update_entry(patient_id, entry).await?)
    }

    pub async fn delete_entry(&self, patient_id: &str, entry_id: &str) -> Result<(), GatewayError> {
        Ok(self.backend.delete_entry(patient_id, entry_id).await?)
    }

    /// Insights for new session notes. Never fails.
    pub async fn generate_insights(&self, patient: &Patient, session_notes: &str) -> Vec<String> {
        insights::generate_insights(&self.assistant, patient, session_notes).await
    }

    /// Generate insights from a stored entry's notes and store them on it.
    /// `None` when no entry has `entry_id`.
    pub async fn attach_insights(
        &self,
        patient: &Patient,
        entry_id: &str,
    ) -> Result<Option<PatientHistoryEntry>, GatewayError> {
        let history = self.get_history(&patient.id).await?;
        let Some(mut entry) = history
            .into_iter()
            .find(|e| e.entry_id() == Some(entry_id))
        else {
            debug!(patient_id = %patient.id, entry_id, "no entry to attach insights to");
            return Ok(None);
        };

        let generated = self.generate_insights(patient, &entry.notes).await;
        entry.insights = Some(generated);
        let stored = self.update_entry(&patient.id, entry).await?;

        info!(patient_id = %patient.id, entry_id, "insights attached");
        Ok(Some(stored))
    }

    pub async fn analyze_history(&self, patient: &Patient) -> HistoryAnalysis {
        analysis::analyze_history(&self.assistant, patient).await
    }

    pub async fn simulate_patient_response(
        &self,
        patient: &Patient,
        therapist_message: &str,
        approach: TherapyApproach,
    ) -> String {
        rehearsal::simulate_patient_response(&self.assistant, patient, therapist_message, approach)
            .await
    }

    pub async fn therapy_nudge(
        &self,
        patient_message: &str,
        approach: TherapyApproach,
        focus_points: Option<&str>,
    ) -> String {
        rehearsal::therapy_nudge(&self.assistant, patient_message, approach, focus_points).await
    }
}
