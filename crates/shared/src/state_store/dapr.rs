use crate::{
    abstract_trait::{StateItem, StateStoreTrait},
    errors::StateStoreError,
    utils::HeaderInjector,
};
use async_trait::async_trait;
use opentelemetry::{Context, global};
use reqwest::{
    Client, Method, RequestBuilder, Response, StatusCode, Url,
    header::{HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

const API_TOKEN_HEADER: &str = "dapr-api-token";
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct DaprConfig {
    pub host: String,
    pub http_port: u16,
    pub store_name: String,
    pub api_token: Option<String>,
    pub query_page_limit: u32,
}

impl DaprConfig {
    pub fn new(host: String, http_port: u16, store_name: String) -> Self {
        Self {
            host,
            http_port,
            store_name,
            api_token: None,
            query_page_limit: 100,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.http_port)
    }
}

#[derive(Serialize)]
struct SaveStateItem<'a> {
    key: &'a str,
    value: &'a Value,
}

#[derive(Serialize)]
struct BulkStateRequest<'a> {
    keys: &'a [String],
    parallelism: u32,
}

#[derive(Serialize)]
struct QueryStateRequest {
    page: QueryPage,
}

#[derive(Serialize)]
struct QueryPage {
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Item shape shared by the bulk and query endpoints.
#[derive(Deserialize)]
struct StateResultItem {
    key: String,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct QueryStateResponse {
    #[serde(default)]
    results: Vec<StateResultItem>,
    #[serde(default)]
    token: Option<String>,
}

/// State store client talking to a Dapr sidecar over its HTTP API.
#[derive(Clone)]
pub struct DaprStateStore {
    client: Client,
    base_url: Url,
    store_name: String,
    api_token: Option<String>,
    query_page_limit: u32,
}

impl DaprStateStore {
    pub fn new(config: &DaprConfig) -> Result<Self, StateStoreError> {
        info!(
            "Creating Dapr state store client for '{}' at {}",
            config.store_name,
            config.base_url()
        );

        let base_url = Url::parse(&config.base_url()).map_err(|e| {
            StateStoreError::Backend(format!("invalid Dapr url {}: {e}", config.base_url()))
        })?;

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            store_name: config.store_name.clone(),
            api_token: config.api_token.clone(),
            query_page_limit: config.query_page_limit.max(1),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StateStoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StateStoreError::Backend(format!("Dapr url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut headers = HeaderMap::new();

        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(&Context::current(), &mut HeaderInjector(&mut headers))
        });

        if let Some(token) = &self.api_token
            && let Ok(value) = HeaderValue::from_str(token)
        {
            headers.insert(API_TOKEN_HEADER, value);
        }

        self.client.request(method, url).headers(headers)
    }

    async fn ensure_success(response: Response) -> Result<Response, StateStoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(StateStoreError::Status {
            status: status.as_u16(),
            message,
        })
    }

    fn collect_items(
        items: Vec<StateResultItem>,
        out: &mut Vec<StateItem>,
    ) -> Result<(), StateStoreError> {
        for item in items {
            if let Some(error) = item.error.filter(|e| !e.is_empty()) {
                return Err(StateStoreError::Backend(format!(
                    "failed to read key '{}': {error}",
                    item.key
                )));
            }

            match item.data {
                Some(Value::Null) | None => debug!("Skipping empty state item '{}'", item.key),
                Some(value) => out.push(StateItem {
                    key: item.key,
                    value,
                }),
            }
        }
        Ok(())
    }

    async fn bulk_get_keys(
        &self,
        keys: &[String],
        parallelism: u32,
    ) -> Result<Vec<StateItem>, StateStoreError> {
        let url = self.endpoint(&["v1.0", "state", &self.store_name, "bulk"])?;

        let response = self
            .request(Method::POST, url)
            .json(&BulkStateRequest { keys, parallelism })
            .send()
            .await?;

        let items: Vec<StateResultItem> = Self::ensure_success(response).await?.json().await?;

        let mut out = Vec::with_capacity(items.len());
        Self::collect_items(items, &mut out)?;
        Ok(out)
    }

    async fn query_all(&self) -> Result<Vec<StateItem>, StateStoreError> {
        let url = self.endpoint(&["v1.0-alpha1", "state", &self.store_name, "query"])?;

        let mut out = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let body = QueryStateRequest {
                page: QueryPage {
                    limit: self.query_page_limit,
                    token: token.clone(),
                },
            };

            let response = self
                .request(Method::POST, url.clone())
                .json(&body)
                .send()
                .await?;

            let page: QueryStateResponse = Self::ensure_success(response).await?.json().await?;

            let page_len = page.results.len();
            Self::collect_items(page.results, &mut out)?;

            match page.token.filter(|t| !t.is_empty()) {
                Some(next) if page_len > 0 && token.as_deref() != Some(next.as_str()) => {
                    token = Some(next);
                }
                _ => break,
            }
        }

        debug!("Fetched {} items from state store '{}'", out.len(), self.store_name);
        Ok(out)
    }
}

#[async_trait]
impl StateStoreTrait for DaprStateStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StateStoreError> {
        let url = self.endpoint(&["v1.0", "state", &self.store_name, key])?;
        let response = self.request(Method::GET, url).send().await?;

        if matches!(
            response.status(),
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND
        ) {
            return Ok(None);
        }

        let bytes = Self::ensure_success(response).await?.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        Ok(Some(value))
    }

    async fn save(&self, key: &str, value: &Value) -> Result<(), StateStoreError> {
        let url = self.endpoint(&["v1.0", "state", &self.store_name])?;

        let response = self
            .request(Method::POST, url)
            .json(&[SaveStateItem { key, value }])
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StateStoreError> {
        let url = self.endpoint(&["v1.0", "state", &self.store_name, key])?;
        let response = self.request(Method::DELETE, url).send().await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn bulk_get(
        &self,
        keys: &[String],
        parallelism: u32,
    ) -> Result<Vec<StateItem>, StateStoreError> {
        if keys.is_empty() {
            self.query_all().await
        } else {
            self.bulk_get_keys(keys, parallelism).await
        }
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<(), StateStoreError> {
        let url = self.endpoint(&["v1.0", "healthz", "outbound"])?;

        let poll = async {
            loop {
                match self.request(Method::GET, url.clone()).send().await {
                    Ok(resp) if resp.status().is_success() => return,
                    Ok(resp) => debug!("Dapr sidecar not ready yet: {}", resp.status()),
                    Err(e) => debug!("Dapr sidecar unreachable: {e}"),
                }
                tokio::time::sleep(READY_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, poll).await.map_err(|_| {
            warn!("Dapr sidecar did not become ready within {timeout:?}");
            StateStoreError::NotReady(timeout)
        })
    }
}
