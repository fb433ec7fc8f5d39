use crate::errors::StateStoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Duration};

pub type DynStateStore = Arc<dyn StateStoreTrait + Send + Sync>;

/// One key/value pair returned by a bulk fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateItem {
    pub key: String,
    pub value: Value,
}

/// Key-value capability provided by the sidecar state store.
///
/// Implementations never interpret the stored values; callers own the
/// document format.
#[async_trait]
pub trait StateStoreTrait {
    async fn get(&self, key: &str) -> Result<Option<Value>, StateStoreError>;

    async fn save(&self, key: &str, value: &Value) -> Result<(), StateStoreError>;

    async fn delete(&self, key: &str) -> Result<(), StateStoreError>;

    /// Fetches the given keys, or every stored item when `keys` is empty.
    ///
    /// `parallelism` is a fanout hint forwarded to the store.
    async fn bulk_get(
        &self,
        keys: &[String],
        parallelism: u32,
    ) -> Result<Vec<StateItem>, StateStoreError>;

    /// Waits up to `timeout` for the store to accept requests.
    async fn wait_ready(&self, timeout: Duration) -> Result<(), StateStoreError>;
}
