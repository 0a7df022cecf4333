//! clarity-assistant
//!
//! The language-model collaborator: providers behind the [`chat::ChatProvider`]
//! seam, prompt construction from patient records, and best-effort parsing of
//! free-text replies. Every clinician-facing operation here recovers from
//! provider failure with a fixed placeholder instead of returning an error.

pub mod analysis;
pub mod bedrock;
pub mod chat;
pub mod context;
pub mod error;
pub mod insights;
pub mod openai;
pub mod provider;
pub mod rehearsal;
