use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Kind of clinical contact a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EntryType {
    Session,
    Intake,
    Assessment,
    Crisis,
    #[serde(rename = "Follow-up")]
    FollowUp,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Session => "Session",
            EntryType::Intake => "Intake",
            EntryType::Assessment => "Assessment",
            EntryType::Crisis => "Crisis",
            EntryType::FollowUp => "Follow-up",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symptom severity pair captured during a session. Both axes are 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionMetrics {
    pub anxiety: u8,
    pub depression: u8,
}

impl SessionMetrics {
    pub const MAX: u8 = 100;

    pub fn new(anxiety: u8, depression: u8) -> Result<Self, CoreError> {
        let metrics = Self {
            anxiety,
            depression,
        };
        metrics.validate()?;
        Ok(metrics)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.anxiety > Self::MAX {
            return Err(CoreError::MetricOutOfRange {
                metric: "anxiety",
                value: self.anxiety,
            });
        }
        if self.depression > Self::MAX {
            return Err(CoreError::MetricOutOfRange {
                metric: "depression",
                value: self.depression,
            });
        }
        Ok(())
    }
}

/// One clinical session record in a patient's history.
///
/// `id` is absent until the entry is persisted; the local backend assigns
/// one on save, the remote backend leaves that to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientHistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<String>,
    /// ISO 8601 timestamp or plain calendar date, as entered.
    pub date: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub homework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub metrics: Option<SessionMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub insights: Option<Vec<String>>,
}

impl PatientHistoryEntry {
    pub fn new(date: impl Into<String>, kind: EntryType, notes: impl Into<String>) -> Self {
        Self {
            id: None,
            date: date.into(),
            kind,
            notes: notes.into(),
            homework: None,
            metrics: None,
            insights: None,
        }
    }

    /// The identifier, treating an empty string the same as none.
    pub fn entry_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn has_id(&self) -> bool {
        self.entry_id().is_some()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.metrics {
            Some(metrics) => metrics.validate(),
            None => Ok(()),
        }
    }
}

/// Parse an entry date as an instant. Accepts RFC 3339 timestamps and
/// `YYYY-MM-DD` dates (taken as midnight UTC).
pub fn parse_entry_date(raw: &str) -> Option<jiff::Timestamp> {
    if let Ok(ts) = raw.parse::<jiff::Timestamp>() {
        return Some(ts);
    }
    let date: jiff::civil::Date = raw.parse().ok()?;
    date.to_zoned(jiff::tz::TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Order entries newest-first by date for display.
///
/// Entries whose date does not parse go last, in their original order.
pub fn sort_newest_first(entries: &mut [PatientHistoryEntry]) {
    entries.sort_by_cached_key(|entry| std::cmp::Reverse(parse_entry_date(&entry.date)));
}
