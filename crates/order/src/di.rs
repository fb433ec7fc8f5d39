use crate::{
    abstract_trait::order::service::{DynOrderCommandService, DynOrderQueryService},
    repository::order::{OrderCommandRepository, OrderQueryRepository},
    service::order::{OrderCommandService, OrderQueryService},
};
use prometheus_client::registry::Registry;
use shared::{abstract_trait::DynStateStore, utils::Metrics};
use std::{fmt, sync::Arc, time::Duration};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub store: DynStateStore,
    pub wait_timeout: Duration,
    pub bulk_parallelism: u32,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            store,
            wait_timeout,
            bulk_parallelism,
        } = deps;

        let metrics = Metrics::new();
        metrics.register("order_service", registry);

        let order_query_repo = Arc::new(OrderQueryRepository::new(
            store.clone(),
            wait_timeout,
            bulk_parallelism,
        ));
        let order_command_repo = Arc::new(OrderCommandRepository::new(store, wait_timeout));

        let order_query: DynOrderQueryService =
            Arc::new(OrderQueryService::new(order_query_repo, metrics.clone()));
        let order_command: DynOrderCommandService =
            Arc::new(OrderCommandService::new(order_command_repo, metrics));

        Self {
            order_query,
            order_command,
        }
    }
}
