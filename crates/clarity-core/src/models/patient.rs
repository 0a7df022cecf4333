use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::history::PatientHistoryEntry;

/// A patient record as the client sees it: demographics, diagnoses, and
/// history newest-first. Used as prompt input for the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub diagnosis: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub last_session: String,
    #[serde(default)]
    pub metrics: PatientMetrics,
    #[serde(default)]
    pub history: Vec<PatientHistoryEntry>,
}

/// Aggregate scores shown on the patient card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientMetrics {
    pub anxiety: u8,
    pub depression: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub adherence: Option<u8>,
}

impl Patient {
    /// Diagnoses joined for display and prompts.
    pub fn diagnosis_summary(&self) -> String {
        self.diagnosis.join(", ")
    }

    /// The `n` most recent history entries, in stored (newest-first) order.
    pub fn recent_history(&self, n: usize) -> &[PatientHistoryEntry] {
        &self.history[..self.history.len().min(n)]
    }
}
