//! Patient context blocks embedded in prompts.

use clarity_core::models::{Patient, PatientHistoryEntry, parse_entry_date};
use jiff::tz::TimeZone;

/// Demographics and diagnoses, one field per line.
pub fn build_patient_block(patient: &Patient) -> String {
    format!(
        "Name: {}\nAge: {}\nGender: {}\nDiagnosis: {}",
        patient.name,
        patient.age,
        patient.gender,
        patient.diagnosis_summary()
    )
}

/// Prior sessions separated by `---`. Empty when there is no history.
pub fn build_sessions_block(entries: &[PatientHistoryEntry]) -> String {
    entries
        .iter()
        .map(format_session)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn format_session(entry: &PatientHistoryEntry) -> String {
    let mut block = format!(
        "Date: {}\nType: {}\nNotes: {}\n",
        display_date(&entry.date),
        entry.kind,
        entry.notes
    );
    if let Some(homework) = entry.homework.as_deref().filter(|h| !h.is_empty()) {
        block.push_str(&format!("Homework: {homework}\n"));
    }
    block
}

/// Calendar date (UTC) of an entry, or the raw string if it does not parse.
pub fn display_date(raw: &str) -> String {
    match parse_entry_date(raw) {
        Some(ts) => ts.to_zoned(TimeZone::UTC).date().to_string(),
        None => raw.to_string(),
    }
}
