use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use shared::errors::HttpError;
use tracing::info;

/// Query string extractor whose rejection is a 400 with the reason as a
/// JSON string, like every other error response.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                info!("Rejected query string: {}", rejection.body_text());
                HttpError::BadRequest(rejection.body_text())
            })?;

        Ok(Self(params))
    }
}
