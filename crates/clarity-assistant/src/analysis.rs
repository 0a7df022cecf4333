//! Whole-history analysis: insights plus treatment recommendations.

use clarity_core::models::Patient;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chat::{ChatProvider, ChatRequest};
use crate::context::{build_patient_block, build_sessions_block};
use crate::insights::parse_list_lines;

pub const ANALYSIS_FALLBACK: &str = "Error analyzing patient history. Please try again later.";

const RECENT_SESSIONS: usize = 5;

const SYSTEM_PROMPT: &str = "You are an expert clinical psychologist assistant. \
Analyze the following patient history and identify patterns, progress, insights, and \
treatment recommendations.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryAnalysis {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

impl HistoryAnalysis {
    fn fallback() -> Self {
        Self {
            insights: vec![ANALYSIS_FALLBACK.to_string()],
            recommendations: Vec::new(),
        }
    }
}

pub fn analysis_request(patient: &Patient) -> ChatRequest {
    let user = format!(
        "Patient Information:\n{}\n\nPatient History:\n{}\n\nPlease provide:\n\
1. 3-5 key clinical insights based on the patient's history (patterns, progress, concerns)\n\
2. 3-4 treatment recommendations for future sessions\n\n\
Format your response with two sections: \"INSIGHTS:\" followed by bullet points, and \
\"RECOMMENDATIONS:\" followed by bullet points.",
        build_patient_block(patient),
        build_sessions_block(patient.recent_history(RECENT_SESSIONS)),
    );
    ChatRequest::single_turn(SYSTEM_PROMPT, user).with_sampling(0.3, 800)
}

/// Split a reply on its `RECOMMENDATIONS:` heading (any case) and parse
/// both halves as bullet lists.
pub fn parse_analysis(text: &str) -> HistoryAnalysis {
    let (insights_section, recommendations_section) =
        match find_heading(text, "RECOMMENDATIONS:") {
            Some((start, end)) => (&text[..start], Some(&text[end..])),
            None => (text, None),
        };

    let insights_section = match find_heading(insights_section, "INSIGHTS:") {
        Some((start, end)) => format!(
            "{}{}",
            &insights_section[..start],
            &insights_section[end..]
        ),
        None => insights_section.to_string(),
    };

    // A second RECOMMENDATIONS heading ends the section.
    let recommendations = recommendations_section
        .map(|section| match find_heading(section, "RECOMMENDATIONS:") {
            Some((start, _)) => &section[..start],
            None => section,
        })
        .map(parse_list_lines)
        .unwrap_or_default();

    HistoryAnalysis {
        insights: parse_list_lines(insights_section.trim()),
        recommendations,
    }
}

/// Byte range of the first ASCII-case-insensitive occurrence of `heading`.
fn find_heading(text: &str, heading: &str) -> Option<(usize, usize)> {
    let start = text.to_ascii_lowercase().find(&heading.to_ascii_lowercase())?;
    Some((start, start + heading.len()))
}

/// Analyse the most recent history. Never fails.
pub async fn analyze_history<P: ChatProvider>(provider: &P, patient: &Patient) -> HistoryAnalysis {
    let request = analysis_request(patient);
    match provider.complete(&request).await {
        Ok(text) => {
            let analysis = parse_analysis(&text);
            info!(
                patient_id = %patient.id,
                insights = analysis.insights.len(),
                recommendations = analysis.recommendations.len(),
                "history analysed"
            );
            analysis
        }
        Err(e) => {
            warn!(patient_id = %patient.id, error = %e, "history analysis failed");
            HistoryAnalysis::fallback()
        }
    }
}
