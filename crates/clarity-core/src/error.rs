use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{metric} must be between 0 and 100, got {value}")]
    MetricOutOfRange { metric: &'static str, value: u8 },

    #[error("unknown colour role: {0}")]
    UnknownRole(String),
}
