use super::listing;
use crate::{
    abstract_trait::order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
    domain::requests::order::{
        DateRange, FilterOrderByDate, FindAllOrder, ListOrders, SearchOrderById, required,
    },
    model::Order,
    service::OperationTracer,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::{error, info};
use validator::Validate;

pub const NOT_FOUND_MESSAGE: &str = "no order with that id found";

#[derive(Clone)]
pub struct OrderQueryService {
    pub query: DynOrderQueryRepository,
    tracer: OperationTracer,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, metrics: Metrics) -> Self {
        Self {
            query,
            tracer: OperationTracer::new("order-query-service", metrics),
        }
    }

    fn reject(
        &self,
        tracing_ctx: &TracingContext,
        operation: &str,
        message: &str,
    ) -> ServiceError {
        error!("❌ {operation}: {message}");
        self.tracer
            .complete_tracing_error(tracing_ctx, operation, Method::Get, message);
        ServiceError::Validation(message.to_string())
    }

    /// Waits for the store, then loads every order. Failures close the span.
    async fn load_all(
        &self,
        tracing_ctx: &TracingContext,
        operation: &str,
    ) -> Result<Vec<Order>, ServiceError> {
        let result = match self.query.wait_ready().await {
            Ok(()) => self.query.find_all().await,
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            let log_message = format!("Failed to fetch orders: {e}");
            self.tracer
                .complete_tracing_error(tracing_ctx, operation, Method::Get, &log_message);
            ServiceError::Store(e)
        })
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_id(&self, id: Option<String>) -> Result<Order, ServiceError> {
        let operation = "get_order";
        let tracing_ctx = self.tracer.start_tracing(
            operation,
            vec![KeyValue::new("order.id", id.clone().unwrap_or_default())],
        );

        let Some(id) = required(&id) else {
            return Err(self.reject(
                &tracing_ctx,
                operation,
                "Order \"id\" not found in query string",
            ));
        };

        info!("🔍 Finding order by id: {id}");

        let found = match self.query.wait_ready().await {
            Ok(()) => self.query.find_by_id(id).await,
            Err(e) => Err(e),
        };

        match found {
            Ok(Some(order)) => {
                self.tracer.complete_tracing_success(
                    &tracing_ctx,
                    operation,
                    Method::Get,
                    &format!("Found order {id}"),
                );
                Ok(order)
            }
            Ok(None) => {
                info!("Order {id} not found");
                self.tracer.complete_tracing_error(
                    &tracing_ctx,
                    operation,
                    Method::Get,
                    NOT_FOUND_MESSAGE,
                );
                Err(ServiceError::NotFound(NOT_FOUND_MESSAGE.to_string()))
            }
            Err(e) => {
                let log_message = format!("Failed to find order {id}: {e}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, operation, Method::Get, &log_message);
                Err(ServiceError::Store(e))
            }
        }
    }

    async fn find_all(&self, req: &FindAllOrder) -> Result<Vec<Order>, ServiceError> {
        let operation = "list_orders";
        let tracing_ctx = self.tracer.start_tracing(
            operation,
            vec![
                KeyValue::new("page", req.page.clone().unwrap_or_default()),
                KeyValue::new("per_page", req.per_page.clone().unwrap_or_default()),
                KeyValue::new("sort_by", req.sort_by.clone().unwrap_or_default()),
                KeyValue::new("sort_order", req.sort_order.clone().unwrap_or_default()),
            ],
        );

        let list = match ListOrders::try_from(req) {
            Ok(list) => list,
            Err(reason) => {
                info!("Rejected listing parameters: {reason}");
                return Err(self.reject(&tracing_ctx, operation, "Invalid pagination parameters"));
            }
        };

        if let Err(errors) = list.validate() {
            info!("Rejected listing parameters: {errors}");
            return Err(self.reject(&tracing_ctx, operation, "Invalid pagination parameters"));
        }

        info!(
            "📦 Listing orders | Page: {}, Per page: {}, Sort: {} {:?}",
            list.page, list.per_page, list.sort_by, list.sort_order
        );

        let orders = self.load_all(&tracing_ctx, operation).await?;
        let total = orders.len();
        let page = listing::sort_and_paginate(orders, &list);

        self.tracer.complete_tracing_success(
            &tracing_ctx,
            operation,
            Method::Get,
            &format!("Returned {} of {total} orders", page.len()),
        );

        Ok(page)
    }

    async fn filter_by_date(&self, req: &FilterOrderByDate) -> Result<Vec<Order>, ServiceError> {
        let operation = "filter_orders";
        let tracing_ctx = self.tracer.start_tracing(
            operation,
            vec![
                KeyValue::new("start_date", req.start_date.clone().unwrap_or_default()),
                KeyValue::new("end_date", req.end_date.clone().unwrap_or_default()),
            ],
        );

        let Ok(range) = DateRange::try_from(req) else {
            return Err(self.reject(&tracing_ctx, operation, "Invalid date range"));
        };

        info!("📅 Filtering orders between {} and {}", range.start, range.end);

        let orders = self.load_all(&tracing_ctx, operation).await?;
        let matched = listing::filter_by_date(orders, &range);

        self.tracer.complete_tracing_success(
            &tracing_ctx,
            operation,
            Method::Get,
            &format!("Found {} orders in range", matched.len()),
        );

        Ok(matched)
    }

    async fn search_by_id(&self, req: &SearchOrderById) -> Result<Vec<Order>, ServiceError> {
        let operation = "search_orders";
        let tracing_ctx = self.tracer.start_tracing(
            operation,
            vec![KeyValue::new(
                "order_id",
                req.order_id.clone().unwrap_or_default(),
            )],
        );

        let Some(needle) = required(&req.order_id) else {
            return Err(self.reject(&tracing_ctx, operation, "Invalid order ID"));
        };

        info!("🔎 Searching orders with id containing '{needle}'");

        let orders = self.load_all(&tracing_ctx, operation).await?;
        let matched = listing::search_by_id(orders, needle);

        self.tracer.complete_tracing_success(
            &tracing_ctx,
            operation,
            Method::Get,
            &format!("Found {} matching orders", matched.len()),
        );

        Ok(matched)
    }
}
