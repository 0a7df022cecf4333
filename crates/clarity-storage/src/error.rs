use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API request failed: {status_text}")]
    Request { status: u16, status_text: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("blocking task failed: {0}")]
    Join(String),
}
