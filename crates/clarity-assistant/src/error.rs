use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("assistant config error: {0}")]
    Config(String),
}
