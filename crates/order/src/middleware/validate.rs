use crate::model::Order;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use shared::errors::HttpError;
use tracing::info;

/// JSON body that must decode to an object. Every rejection becomes a 400
/// with the reason as a JSON string.
pub struct OrderJson(pub Order);

impl<S> FromRequest<S> for OrderJson
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                info!("Rejected order body: {}", rejection.body_text());
                HttpError::BadRequest(rejection.body_text())
            })?;

        match value {
            Value::Object(map) => Ok(Self(Order::from(map))),
            _ => Err(HttpError::BadRequest(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }
}
