use crate::{
    domain::requests::order::{FilterOrderByDate, FindAllOrder, SearchOrderById},
    model::Order,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_by_id(&self, id: Option<String>) -> Result<Order, ServiceError>;
    async fn find_all(&self, req: &FindAllOrder) -> Result<Vec<Order>, ServiceError>;
    async fn filter_by_date(&self, req: &FilterOrderByDate) -> Result<Vec<Order>, ServiceError>;
    async fn search_by_id(&self, req: &SearchOrderById) -> Result<Vec<Order>, ServiceError>;
}
