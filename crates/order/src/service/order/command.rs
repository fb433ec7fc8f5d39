use crate::{
    abstract_trait::order::{
        repository::DynOrderCommandRepository, service::OrderCommandServiceTrait,
    },
    domain::requests::order::required,
    model::Order,
    service::OperationTracer,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandService {
    pub command: DynOrderCommandRepository,
    tracer: OperationTracer,
}

impl OrderCommandService {
    pub fn new(command: DynOrderCommandRepository, metrics: Metrics) -> Self {
        Self {
            command,
            tracer: OperationTracer::new("order-command-service", metrics),
        }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(&self, order: Order) -> Result<Order, ServiceError> {
        let operation = "create_order";
        let tracing_ctx = self.tracer.start_tracing(
            operation,
            vec![KeyValue::new(
                "order.id",
                order.id().unwrap_or_default().to_string(),
            )],
        );

        let Some(id) = order.id().map(str::to_owned) else {
            let message = "Order \"id\" not found in request body";
            error!("❌ {operation}: {message}");
            self.tracer
                .complete_tracing_error(&tracing_ctx, operation, Method::Post, message);
            return Err(ServiceError::Validation(message.to_string()));
        };

        info!("🏗️ Saving order {id}");

        let saved = match self.command.wait_ready().await {
            Ok(()) => self.command.save_order(&id, &order).await,
            Err(e) => Err(e),
        };

        if let Err(e) = saved {
            let log_message = format!("Failed to save order {id}: {e}");
            self.tracer
                .complete_tracing_error(&tracing_ctx, operation, Method::Post, &log_message);
            return Err(ServiceError::Store(e));
        }

        self.tracer.complete_tracing_success(
            &tracing_ctx,
            operation,
            Method::Post,
            &format!("Order {id} saved"),
        );

        Ok(order)
    }

    async fn delete_order(&self, id: Option<String>) -> Result<String, ServiceError> {
        let operation = "delete_order";
        let tracing_ctx = self.tracer.start_tracing(
            operation,
            vec![KeyValue::new("order.id", id.clone().unwrap_or_default())],
        );

        let Some(id) = required(&id) else {
            let message = "Order \"id\" not found in query string";
            error!("❌ {operation}: {message}");
            self.tracer
                .complete_tracing_error(&tracing_ctx, operation, Method::Delete, message);
            return Err(ServiceError::Validation(message.to_string()));
        };

        info!("🗑️ Deleting order {id}");

        let deleted = match self.command.wait_ready().await {
            Ok(()) => self.command.delete_order(id).await,
            Err(e) => Err(e),
        };

        if let Err(e) = deleted {
            let log_message = format!("Failed to delete order {id}: {e}");
            self.tracer
                .complete_tracing_error(&tracing_ctx, operation, Method::Delete, &log_message);
            return Err(ServiceError::Store(e));
        }

        let message = format!("Item {id} successfully deleted");
        self.tracer
            .complete_tracing_success(&tracing_ctx, operation, Method::Delete, &message);

        Ok(message)
    }
}
