use crate::{abstract_trait::order::repository::OrderQueryRepositoryTrait, model::Order};
use async_trait::async_trait;
use shared::{abstract_trait::DynStateStore, errors::StateStoreError};
use std::time::Duration;
use tracing::{error, info, warn};

pub struct OrderQueryRepository {
    store: DynStateStore,
    wait_timeout: Duration,
    bulk_parallelism: u32,
}

impl OrderQueryRepository {
    pub fn new(store: DynStateStore, wait_timeout: Duration, bulk_parallelism: u32) -> Self {
        Self {
            store,
            wait_timeout,
            bulk_parallelism,
        }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn wait_ready(&self) -> Result<(), StateStoreError> {
        self.store.wait_ready(self.wait_timeout).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StateStoreError> {
        let value = self.store.get(id).await.map_err(|err| {
            error!("❌ Failed to read order {id}: {err}");
            err
        })?;

        match value {
            None => Ok(None),
            Some(value) => Order::from_value(value).map(Some).ok_or_else(|| {
                StateStoreError::Backend(format!(
                    "stored value for key '{id}' is not an order document"
                ))
            }),
        }
    }

    async fn find_all(&self) -> Result<Vec<Order>, StateStoreError> {
        let items = self
            .store
            .bulk_get(&[], self.bulk_parallelism)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch orders: {err}");
                err
            })?;

        let total = items.len();
        let orders: Vec<Order> = items
            .into_iter()
            .filter_map(|item| {
                let key = item.key;
                Order::from_value(item.value).or_else(|| {
                    warn!("Skipping non-order value stored under key '{key}'");
                    None
                })
            })
            .collect();

        info!("Fetched {} of {total} stored items as orders", orders.len());
        Ok(orders)
    }
}
