//! clarity-storage
//!
//! Patient history persistence. Two backends share one contract: a local
//! key-value store holding each patient's collection as a JSON document, and
//! a remote REST API. [`backend::HistoryBackend`] picks one at construction.

pub mod backend;
pub mod error;
pub mod kv;
pub mod local;
pub mod remote;
