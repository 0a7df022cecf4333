use clarity_storage::error::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("gateway config error: {0}")]
    Config(String),
}
