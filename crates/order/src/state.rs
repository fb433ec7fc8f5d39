use crate::{
    config::{Config, StateStoreBackend},
    di::{DependenciesInject, DependenciesInjectDeps},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynStateStore,
    state_store::{DaprStateStore, MemoryStateStore},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc, time::Duration};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &self.registry)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    /// Wires the services over `store`. Does not start the system metrics
    /// collector.
    pub fn new(store: DynStateStore, wait_timeout: Duration, bulk_parallelism: u32) -> Self {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let deps = DependenciesInjectDeps {
            store,
            wait_timeout,
            bulk_parallelism,
        };

        let di_container = DependenciesInject::new(deps, &mut registry);

        registry.register_metrics(&system_metrics);

        Self {
            di_container,
            registry: Arc::new(registry),
            system_metrics,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let store: DynStateStore = match config.backend {
            StateStoreBackend::Dapr => {
                info!(
                    "Using Dapr state store '{}' at {}",
                    config.dapr.store_name,
                    config.dapr.base_url()
                );
                Arc::new(
                    DaprStateStore::new(&config.dapr)
                        .context("Failed to create Dapr state store client")?,
                )
            }
            StateStoreBackend::Memory => {
                info!("Using in-memory state store");
                Arc::new(MemoryStateStore::new())
            }
        };

        let state = Self::new(store, config.wait_timeout, config.bulk_parallelism);

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        Ok(state)
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
