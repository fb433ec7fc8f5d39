use crate::model::Order;
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::StateStoreError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn wait_ready(&self) -> Result<(), StateStoreError>;
    async fn save_order(&self, id: &str, order: &Order) -> Result<(), StateStoreError>;
    async fn delete_order(&self, id: &str) -> Result<(), StateStoreError>;
}
