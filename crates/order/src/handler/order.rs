use crate::{
    abstract_trait::order::service::{DynOrderCommandService, DynOrderQueryService},
    domain::requests::order::{FilterOrderByDate, FindAllOrder, FindByIdOrder, SearchOrderById},
    middleware::{query::QueryParams, validate::OrderJson},
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/order",
    tag = "Order",
    params(FindByIdOrder),
    responses(
        (status = 200, description = "Stored order document", body = serde_json::Value),
        (status = 400, description = "Missing id", body = String),
        (status = 404, description = "No order with that id", body = String),
        (status = 500, description = "State store error", body = String),
        (status = 503, description = "State store not ready", body = String)
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    QueryParams(params): QueryParams<FindByIdOrder>,
) -> Result<impl IntoResponse, HttpError> {
    let order = service.find_by_id(params.id).await?;
    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    post,
    path = "/order",
    tag = "Order",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Order saved, body echoed", body = serde_json::Value),
        (status = 400, description = "Malformed body or missing id", body = String),
        (status = 500, description = "State store error", body = String),
        (status = 503, description = "State store not ready", body = String)
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    OrderJson(body): OrderJson,
) -> Result<impl IntoResponse, HttpError> {
    let order = service.create_order(body).await?;
    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    delete,
    path = "/order",
    tag = "Order",
    params(FindByIdOrder),
    responses(
        (status = 200, description = "Deletion confirmation", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing id", body = String),
        (status = 500, description = "State store error", body = String),
        (status = 503, description = "State store not ready", body = String)
    )
)]
pub async fn delete_order(
    Extension(service): Extension<DynOrderCommandService>,
    QueryParams(params): QueryParams<FindByIdOrder>,
) -> Result<impl IntoResponse, HttpError> {
    let message = service.delete_order(params.id).await?;
    Ok((StatusCode::OK, message))
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "Order",
    params(FindAllOrder),
    responses(
        (status = 200, description = "One page of orders", body = Vec<serde_json::Value>),
        (status = 400, description = "Invalid pagination parameters", body = String),
        (status = 500, description = "State store error", body = String),
        (status = 503, description = "State store not ready", body = String)
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    QueryParams(params): QueryParams<FindAllOrder>,
) -> Result<impl IntoResponse, HttpError> {
    let orders = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(orders)))
}

#[utoipa::path(
    get,
    path = "/orders/filter",
    tag = "Order",
    params(FilterOrderByDate),
    responses(
        (status = 200, description = "Orders dated within the range", body = Vec<serde_json::Value>),
        (status = 400, description = "Invalid date range", body = String),
        (status = 500, description = "State store error", body = String),
        (status = 503, description = "State store not ready", body = String)
    )
)]
pub async fn filter_orders(
    Extension(service): Extension<DynOrderQueryService>,
    QueryParams(params): QueryParams<FilterOrderByDate>,
) -> Result<impl IntoResponse, HttpError> {
    let orders = service.filter_by_date(&params).await?;
    Ok((StatusCode::OK, Json(orders)))
}

#[utoipa::path(
    get,
    path = "/orders/search",
    tag = "Order",
    params(SearchOrderById),
    responses(
        (status = 200, description = "Orders whose id contains the term", body = Vec<serde_json::Value>),
        (status = 400, description = "Invalid order ID", body = String),
        (status = 500, description = "State store error", body = String),
        (status = 503, description = "State store not ready", body = String)
    )
)]
pub async fn search_orders(
    Extension(service): Extension<DynOrderQueryService>,
    QueryParams(params): QueryParams<SearchOrderById>,
) -> Result<impl IntoResponse, HttpError> {
    let orders = service.search_by_id(&params).await?;
    Ok((StatusCode::OK, Json(orders)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/order",
            get(get_order).post(create_order).delete(delete_order),
        )
        .route("/orders", get(get_orders))
        .route("/orders/filter", get(filter_orders))
        .route("/orders/search", get(search_orders))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
}
