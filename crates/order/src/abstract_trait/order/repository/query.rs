use crate::model::Order;
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::StateStoreError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn wait_ready(&self) -> Result<(), StateStoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StateStoreError>;
    /// Every stored order, in the order the store returns them.
    async fn find_all(&self) -> Result<Vec<Order>, StateStoreError>;
}
