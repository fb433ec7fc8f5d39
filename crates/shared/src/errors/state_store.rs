use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("State store not ready after {0:?}")]
    NotReady(Duration),

    #[error("State store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("State store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}
