use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use order::{handler::AppRouter, state::AppState};
use serde_json::{Value, json};
use shared::{
    abstract_trait::{DynStateStore, StateItem, StateStoreTrait},
    errors::StateStoreError,
    state_store::MemoryStateStore,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

struct FailingStore {
    ready: bool,
}

#[async_trait]
impl StateStoreTrait for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, StateStoreError> {
        Err(StateStoreError::Backend("connection refused".into()))
    }

    async fn save(&self, _key: &str, _value: &Value) -> Result<(), StateStoreError> {
        Err(StateStoreError::Backend("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), StateStoreError> {
        Err(StateStoreError::Backend("connection refused".into()))
    }

    async fn bulk_get(
        &self,
        _keys: &[String],
        _parallelism: u32,
    ) -> Result<Vec<StateItem>, StateStoreError> {
        Err(StateStoreError::Backend("connection refused".into()))
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<(), StateStoreError> {
        if self.ready {
            Ok(())
        } else {
            Err(StateStoreError::NotReady(timeout))
        }
    }
}

fn app_with(store: DynStateStore) -> Router {
    let state = AppState::new(store, Duration::from_millis(100), 10);
    AppRouter::build(Arc::new(state))
}

async fn seeded_app() -> (Router, MemoryStateStore) {
    let store = MemoryStateStore::new();
    let orders = [
        json!({"id": "A1", "date": "2022-03-01", "total": 30}),
        json!({"id": "B2", "date": "2022-06-15", "total": 10}),
        json!({"id": "C3", "date": "2022-01-01", "total": 20}),
        json!({"id": "D4", "date": "bad"}),
        json!({"id": "a12", "date": "2021-12-31"}),
    ];
    for order in orders {
        let id = order["id"].as_str().unwrap().to_string();
        store.save(&id, &order).await.unwrap();
    }

    (app_with(Arc::new(store.clone())), store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::post("/order")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

fn ids(body: &[u8]) -> Vec<String> {
    json_body(body)
        .as_array()
        .unwrap()
        .iter()
        .map(|order| order["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_then_get_round_trips_the_document() {
    let app = app_with(Arc::new(MemoryStateStore::new()));
    let document = json!({"id": "X9", "date": "2023-01-02", "items": [{"sku": "k", "qty": 2}]});

    let (status, body) = post_json(&app, &document.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), document);

    let (status, body) = get(&app, "/order?id=X9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), document);
}

#[tokio::test]
async fn create_overwrites_existing_id() {
    let (app, store) = seeded_app().await;

    let (status, _) = post_json(&app, r#"{"id": "A1", "date": "2024-01-01"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.len().await, 5);

    let (_, body) = get(&app, "/order?id=A1").await;
    assert_eq!(json_body(&body), json!({"id": "A1", "date": "2024-01-01"}));
}

#[tokio::test]
async fn create_rejects_missing_id() {
    let store = MemoryStateStore::new();
    let app = app_with(Arc::new(store.clone()));

    for body in [r#"{"date": "2022-01-01"}"#, r#"{"id": ""}"#, r#"{"id": 7}"#] {
        let (status, response) = post_json(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(&response),
            json!("Order \"id\" not found in request body")
        );
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_rejects_non_object_bodies() {
    let app = app_with(Arc::new(MemoryStateStore::new()));

    let (status, _) = post_json(&app, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(&app, r#"[{"id": "A1"}]"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body), json!("Request body must be a JSON object"));

    let request = Request::post("/order")
        .body(Body::from(r#"{"id": "A1"}"#))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_requires_id() {
    let (app, _) = seeded_app().await;

    for uri in ["/order", "/order?id="] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(&body),
            json!("Order \"id\" not found in query string")
        );
    }
}

#[tokio::test]
async fn malformed_query_string_is_json_bad_request() {
    let (app, store) = seeded_app().await;

    for (status, body) in [
        get(&app, "/order?id=A1&id=B2").await,
        delete(&app, "/order?id=A1&id=B2").await,
        get(&app, "/orders?page=1&page=2").await,
        get(&app, "/orders/search?order_id=A&order_id=B").await,
    ] {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json_body(&body).is_string());
    }

    assert_eq!(store.len().await, 5);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let (app, _) = seeded_app().await;

    let (status, body) = get(&app, "/order?id=ZZ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body), json!("no order with that id found"));
}

#[tokio::test]
async fn delete_removes_the_order() {
    let (app, store) = seeded_app().await;

    let (status, body) = delete(&app, "/order?id=B2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Item B2 successfully deleted");
    assert_eq!(store.len().await, 4);

    let (status, _) = get(&app, "/order?id=B2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, "/order?id=B2").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_requires_id() {
    let (app, store) = seeded_app().await;

    let (status, _) = delete(&app, "/order?id=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.len().await, 5);
}

#[tokio::test]
async fn list_uses_defaults() {
    let (app, _) = seeded_app().await;

    let (status, body) = get(&app, "/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["A1", "B2", "C3", "D4", "a12"]);
}

#[tokio::test]
async fn list_sorts_and_paginates() {
    let (app, _) = seeded_app().await;

    let (_, body) = get(&app, "/orders?page=1&per_page=2").await;
    assert_eq!(ids(&body), vec!["A1", "B2"]);

    let (_, body) = get(&app, "/orders?page=3&per_page=2").await;
    assert_eq!(ids(&body), vec!["a12"]);

    let (_, body) = get(&app, "/orders?page=1&per_page=2&sort_order=desc").await;
    assert_eq!(ids(&body), vec!["a12", "D4"]);

    let (_, body) = get(&app, "/orders?sort_by=total").await;
    assert_eq!(ids(&body), vec!["B2", "C3", "A1", "D4", "a12"]);

    let (status, body) = get(&app, "/orders?page=9&per_page=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn list_rejects_bad_pagination() {
    let (app, _) = seeded_app().await;

    for uri in [
        "/orders?page=0",
        "/orders?per_page=0",
        "/orders?page=abc",
        "/orders?per_page=-1",
        "/orders?sort_order=up",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json_body(&body), json!("Invalid pagination parameters"));
    }
}

#[tokio::test]
async fn filter_is_inclusive_and_keeps_fetch_order() {
    let (app, _) = seeded_app().await;

    let (status, body) = get(&app, "/orders/filter?start_date=2022-01-01&end_date=2022-03-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["A1", "C3"]);

    let (_, body) = get(&app, "/orders/filter?start_date=2023-01-01&end_date=2023-12-31").await;
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn filter_rejects_bad_range() {
    let (app, _) = seeded_app().await;

    for uri in [
        "/orders/filter?start_date=2022-01-01",
        "/orders/filter?start_date=&end_date=2022-01-01",
        "/orders/filter?start_date=01/01/2022&end_date=2022-03-01",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json_body(&body), json!("Invalid date range"));
    }
}

#[tokio::test]
async fn search_matches_case_sensitive_substring() {
    let (app, _) = seeded_app().await;

    let (status, body) = get(&app, "/orders/search?order_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["A1", "a12"]);

    let (_, body) = get(&app, "/orders/search?order_id=A").await;
    assert_eq!(ids(&body), vec!["A1"]);

    let (status, body) = get(&app, "/orders/search?order_id=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body), json!("Invalid order ID"));
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let app = app_with(Arc::new(FailingStore { ready: true }));

    let responses = [
        get(&app, "/order?id=A1").await,
        post_json(&app, r#"{"id": "A1"}"#).await,
        delete(&app, "/order?id=A1").await,
        get(&app, "/orders").await,
        get(&app, "/orders/filter?start_date=2022-01-01&end_date=2022-12-31").await,
        get(&app, "/orders/search?order_id=A").await,
    ];

    for (status, body) in responses {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = json_body(&body);
        assert!(message.as_str().unwrap().contains("connection refused"));
    }
}

#[tokio::test]
async fn unready_store_is_service_unavailable() {
    let app = app_with(Arc::new(FailingStore { ready: false }));

    let (status, _) = get(&app, "/orders").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = post_json(&app, r#"{"id": "A1"}"#).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = get(&app, "/orders?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn metrics_count_requests_per_operation() {
    let (app, _) = seeded_app().await;

    get(&app, "/order?id=A1").await;
    get(&app, "/order?id=ZZ").await;

    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("order_service_requests_total"));
    assert!(text.contains(r#"operation="get_order""#));
    assert!(text.contains(r#"status="Error""#));
}

#[tokio::test]
async fn openapi_document_lists_order_routes() {
    let app = app_with(Arc::new(MemoryStateStore::new()));

    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);

    let doc = json_body(&body);
    for path in ["/order", "/orders", "/orders/filter", "/orders/search"] {
        assert!(doc["paths"].get(path).is_some(), "{path}");
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app_with(Arc::new(MemoryStateStore::new()));

    let request = Request::get("/orders")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
