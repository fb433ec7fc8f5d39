use crate::errors::{service::ServiceError, state_store::StateStoreError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Error returned by HTTP handlers.
///
/// The body is the message encoded as a bare JSON string, e.g.
/// `"Invalid date range"`.
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            HttpError::BadRequest(msg)
            | HttpError::NotFound(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::Internal(msg) => msg,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => HttpError::BadRequest(msg),
            ServiceError::NotFound(msg) => HttpError::NotFound(msg),
            ServiceError::Store(store_err @ StateStoreError::NotReady(_)) => {
                HttpError::ServiceUnavailable(store_err.to_string())
            }
            ServiceError::Store(store_err) => HttpError::Internal(store_err.to_string()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            HttpError::BadRequest(msg)
            | HttpError::NotFound(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::Internal(msg) => msg,
        };

        (status, Json(msg)).into_response()
    }
}
