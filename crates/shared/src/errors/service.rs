use crate::errors::state_store::StateStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("State store error: {0}")]
    Store(#[from] StateStoreError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),
}
