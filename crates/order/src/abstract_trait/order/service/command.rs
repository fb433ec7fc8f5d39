use crate::model::Order;
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    /// Saves the document under its `id` and returns it unchanged.
    async fn create_order(&self, order: Order) -> Result<Order, ServiceError>;
    /// Deletes by id and returns the confirmation message.
    async fn delete_order(&self, id: Option<String>) -> Result<String, ServiceError>;
}
