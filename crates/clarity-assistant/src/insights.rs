//! Session insight generation.
//!
//! The reply is free text, so parsing is heuristic: bulleted or numbered
//! lines first, sentences as a fallback. A provider failure, or a reply with
//! nothing usable in it, yields [`INSIGHTS_FALLBACK`] so the insight panel
//! always has something to show.

use clarity_core::models::Patient;
use tracing::{info, warn};

use crate::chat::{ChatProvider, ChatRequest};
use crate::context::{build_patient_block, build_sessions_block};

pub const INSIGHTS_FALLBACK: &str = "Error generating insights. Please try again later.";

pub const MAX_INSIGHTS: usize = 5;

/// Insights must be strictly longer than this many characters; shorter
/// lines are usually headers.
const MIN_INSIGHT_CHARS: usize = 10;

const RECENT_SESSIONS: usize = 3;

const SYSTEM_PROMPT: &str = "You are an expert clinical psychologist assistant. \
Generate 3-5 key insights from the latest therapy session notes, considering the \
patient's history and diagnosis.";

pub fn insight_request(patient: &Patient, session_notes: &str) -> ChatRequest {
    let user = format!(
        "Patient Information:\n{}\n\nPrevious sessions:\n{}\n\nLatest session notes:\n{}\n\n\
Generate 3-5 key clinical insights from this session. Format each insight as a separate \
bullet point, focusing on patterns, progress, concerns, and treatment recommendations.",
        build_patient_block(patient),
        build_sessions_block(patient.recent_history(RECENT_SESSIONS)),
        session_notes
    );
    ChatRequest::single_turn(SYSTEM_PROMPT, user).with_sampling(0.3, 500)
}

/// Split a reply into at most [`MAX_INSIGHTS`] insights.
pub fn parse_insights(text: &str) -> Vec<String> {
    let mut insights = parse_list_lines(text);
    if insights.is_empty() {
        insights = text
            .split('.')
            .map(str::trim)
            .filter(|sentence| sentence.chars().count() > MIN_INSIGHT_CHARS)
            .map(str::to_string)
            .collect();
    }
    insights.truncate(MAX_INSIGHTS);
    insights
}

/// Non-trivial lines with list markers removed. Uncapped.
pub(crate) fn parse_list_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_list_marker)
        .filter(|line| line.chars().count() > MIN_INSIGHT_CHARS)
        .map(str::to_string)
        .collect()
}

/// Drop one leading bullet (`•`, `-`, `*`) and then one `N.` number.
fn strip_list_marker(line: &str) -> &str {
    let mut rest = line
        .strip_prefix(['•', '-', '*'])
        .map(str::trim_start)
        .unwrap_or(line);

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(after) = rest[digits..].strip_prefix('.') {
            rest = after.trim_start();
        }
    }
    rest.trim()
}

/// Generate insights for new session notes. Never fails.
pub async fn generate_insights<P: ChatProvider>(
    provider: &P,
    patient: &Patient,
    session_notes: &str,
) -> Vec<String> {
    let request = insight_request(patient, session_notes);
    match provider.complete(&request).await {
        Ok(text) => {
            let insights = parse_insights(&text);
            if insights.is_empty() {
                warn!(patient_id = %patient.id, "reply contained no usable insights");
                return vec![INSIGHTS_FALLBACK.to_string()];
            }
            info!(patient_id = %patient.id, count = insights.len(), "insights generated");
            insights
        }
        Err(e) => {
            warn!(patient_id = %patient.id, error = %e, "insight generation failed");
            vec![INSIGHTS_FALLBACK.to_string()]
        }
    }
}
