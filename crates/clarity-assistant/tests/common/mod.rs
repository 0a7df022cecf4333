#![allow(dead_code)]

use std::sync::Mutex;

use clarity_assistant::chat::{ChatProvider, ChatRequest};
use clarity_assistant::error::AssistantError;
use clarity_core::models::{EntryType, Patient, PatientHistoryEntry, PatientMetrics};

/// Replies with a fixed text, or fails when built with [`ScriptedProvider::failing`].
/// Every request it sees is recorded.
pub struct ScriptedProvider {
    reply: Option<String>,
    seen: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl ChatProvider for ScriptedProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, AssistantError> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(AssistantError::Api {
                status: 500,
                message: "upstream unavailable".to_string(),
            }),
        }
    }
}

pub fn entry(date: &str, notes: &str) -> PatientHistoryEntry {
    PatientHistoryEntry::new(date, EntryType::Session, notes)
}

pub fn patient(history: Vec<PatientHistoryEntry>) -> Patient {
    Patient {
        id: "p1".to_string(),
        name: "Jordan Avery".to_string(),
        age: 34,
        gender: "Non-binary".to_string(),
        diagnosis: vec![
            "Generalized Anxiety Disorder".to_string(),
            "Insomnia".to_string(),
        ],
        status: "Active".to_string(),
        risk_level: "Low".to_string(),
        last_session: "2024-03-10".to_string(),
        metrics: PatientMetrics {
            anxiety: 60,
            depression: 30,
            adherence: Some(80),
        },
        history,
    }
}
