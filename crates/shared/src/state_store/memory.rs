use crate::{
    abstract_trait::{StateItem, StateStoreTrait},
    errors::StateStoreError,
};
use async_trait::async_trait;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tokio::sync::RwLock;

/// In-process state store keeping items in insertion order.
///
/// Nothing survives a restart. Overwriting a key keeps its original position.
#[derive(Clone, Default)]
pub struct MemoryStateStore {
    items: Arc<RwLock<Vec<StateItem>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl StateStoreTrait for MemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StateStoreError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.value.clone()))
    }

    async fn save(&self, key: &str, value: &Value) -> Result<(), StateStoreError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|item| item.key == key) {
            Some(existing) => existing.value = value.clone(),
            None => items.push(StateItem {
                key: key.to_string(),
                value: value.clone(),
            }),
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StateStoreError> {
        let mut items = self.items.write().await;
        items.retain(|item| item.key != key);
        Ok(())
    }

    async fn bulk_get(
        &self,
        keys: &[String],
        _parallelism: u32,
    ) -> Result<Vec<StateItem>, StateStoreError> {
        let items = self.items.read().await;
        if keys.is_empty() {
            return Ok(items.clone());
        }

        Ok(keys
            .iter()
            .filter_map(|key| items.iter().find(|item| &item.key == key).cloned())
            .collect())
    }

    async fn wait_ready(&self, _timeout: Duration) -> Result<(), StateStoreError> {
        Ok(())
    }
}
