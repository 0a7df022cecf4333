pub mod history;
pub mod patient;

pub use history::{EntryType, PatientHistoryEntry, SessionMetrics, parse_entry_date, sort_newest_first};
pub use patient::{Patient, PatientMetrics};
