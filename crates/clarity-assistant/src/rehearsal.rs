//! Session rehearsal: a simulated patient and real-time supervisor nudges.

use std::fmt;

use clarity_core::models::Patient;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chat::{ChatProvider, ChatRequest};

pub const SIMULATION_FALLBACK: &str = "I'm not feeling well today. Can we talk about this later?";

pub const NUDGE_FALLBACK: &str =
    "Consider exploring underlying emotions and validating the patient's experience.";

/// Therapeutic approach the therapist is rehearsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TherapyApproach {
    Cbt,
    Psychodynamic,
    Mindfulness,
}

impl TherapyApproach {
    /// Unrecognised names are treated as mindfulness.
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cbt" => TherapyApproach::Cbt,
            "psychodynamic" => TherapyApproach::Psychodynamic,
            _ => TherapyApproach::Mindfulness,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TherapyApproach::Cbt => "cbt",
            TherapyApproach::Psychodynamic => "psychodynamic",
            TherapyApproach::Mindfulness => "mindfulness",
        }
    }

    fn patient_guidance(self) -> &'static str {
        match self {
            TherapyApproach::Cbt => {
                "The therapist is using Cognitive Behavioral Therapy. Show thought patterns \
that could benefit from cognitive restructuring."
            }
            TherapyApproach::Psychodynamic => {
                "The therapist is using Psychodynamic Therapy. Include references to past \
experiences and relationships that might be influencing current feelings."
            }
            TherapyApproach::Mindfulness => {
                "The therapist is using Mindfulness-Based Therapy. Show difficulty staying \
present and tendency to worry about past or future."
            }
        }
    }
}

impl fmt::Display for TherapyApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn simulation_request(
    patient: &Patient,
    therapist_message: &str,
    approach: TherapyApproach,
) -> ChatRequest {
    let system = format!(
        "You are simulating a patient named {} with the following conditions: {}.\n\
The patient has these characteristics: {} years old, {}.\n\
Respond as this patient would, showing appropriate symptoms and thought patterns.\n{}",
        patient.name,
        patient.diagnosis_summary(),
        patient.age,
        patient.gender,
        approach.patient_guidance()
    );
    ChatRequest::single_turn(system, therapist_message).with_sampling(0.7, 300)
}

/// The simulated patient's reply to the therapist. Never fails.
pub async fn simulate_patient_response<P: ChatProvider>(
    provider: &P,
    patient: &Patient,
    therapist_message: &str,
    approach: TherapyApproach,
) -> String {
    let request = simulation_request(patient, therapist_message, approach);
    match provider.complete(&request).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(patient_id = %patient.id, error = %e, "patient simulation failed");
            SIMULATION_FALLBACK.to_string()
        }
    }
}

pub fn nudge_request(
    patient_message: &str,
    approach: TherapyApproach,
    focus_points: Option<&str>,
) -> ChatRequest {
    let mut system = format!(
        "You are an expert clinical supervisor providing real-time guidance to a therapist.\n\
Based on the patient's message, suggest a helpful therapeutic intervention or question.\n\
Keep suggestions concise, practical, and aligned with {approach} therapy."
    );
    if let Some(focus) = focus_points.filter(|f| !f.trim().is_empty()) {
        system.push_str(&format!("\nFocus areas for this session: {focus}"));
    }
    let user = format!(
        "Patient said: \"{patient_message}\". What would be a good therapeutic response or question?"
    );
    ChatRequest::single_turn(system, user).with_sampling(0.4, 150)
}

/// A suggested next move for the therapist. Never fails.
pub async fn therapy_nudge<P: ChatProvider>(
    provider: &P,
    patient_message: &str,
    approach: TherapyApproach,
    focus_points: Option<&str>,
) -> String {
    let request = nudge_request(patient_message, approach, focus_points);
    match provider.complete(&request).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "therapy nudge failed");
            NUDGE_FALLBACK.to_string()
        }
    }
}
