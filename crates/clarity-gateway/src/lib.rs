//! clarity-gateway
//!
//! The single entry point the client uses for patient data: history
//! persistence through whichever backend configuration selects, plus the
//! assistant operations that read that history.

pub mod config;
pub mod error;
pub mod gateway;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::PatientDataGateway;
