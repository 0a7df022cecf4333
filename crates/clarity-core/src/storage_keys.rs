//! Local storage key conventions.
//!
//! Pure string functions. These define the canonical layout of patient data
//! in the local key-value store.

pub const PREFIX: &str = "clarity";

/// Key owning one patient's full history collection.
pub fn patient_history(patient_id: &str) -> String {
    format!("{PREFIX}_patient_{patient_id}_history")
}
