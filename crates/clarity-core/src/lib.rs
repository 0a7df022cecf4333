//! clarity-core
//!
//! Pure domain types, theme palettes, and local storage key conventions.
//! No I/O here: this is the shared vocabulary every Clarity view consumes.

pub mod error;
pub mod models;
pub mod storage_keys;
pub mod theme;
