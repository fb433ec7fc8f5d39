use crate::{abstract_trait::order::repository::OrderCommandRepositoryTrait, model::Order};
use async_trait::async_trait;
use shared::{abstract_trait::DynStateStore, errors::StateStoreError};
use std::time::Duration;
use tracing::{error, info};

pub struct OrderCommandRepository {
    store: DynStateStore,
    wait_timeout: Duration,
}

impl OrderCommandRepository {
    pub fn new(store: DynStateStore, wait_timeout: Duration) -> Self {
        Self {
            store,
            wait_timeout,
        }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn wait_ready(&self) -> Result<(), StateStoreError> {
        self.store.wait_ready(self.wait_timeout).await
    }

    async fn save_order(&self, id: &str, order: &Order) -> Result<(), StateStoreError> {
        let value = serde_json::to_value(order)?;

        self.store.save(id, &value).await.map_err(|err| {
            error!("❌ Failed to save order {id}: {err}");
            err
        })?;

        info!("✅ Saved order {id}");
        Ok(())
    }

    async fn delete_order(&self, id: &str) -> Result<(), StateStoreError> {
        self.store.delete(id).await.map_err(|err| {
            error!("❌ Failed to delete order {id}: {err}");
            err
        })?;

        info!("🗑️ Deleted order {id}");
        Ok(())
    }
}
