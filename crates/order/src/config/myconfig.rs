use anyhow::{Context, Result, anyhow};
use shared::{state_store::DaprConfig, utils::LogConfig};
use std::time::Duration;

pub const SERVICE_NAME: &str = "order-service";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateStoreBackend {
    Dapr,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend: StateStoreBackend,
    pub dapr: DaprConfig,
    pub wait_timeout: Duration,
    pub bulk_parallelism: u32,
    pub is_dev: bool,
    pub enable_file_log: bool,
    pub otel_endpoint: Option<String>,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset or empty keys take their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = var("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let backend = match var("STATE_STORE_BACKEND").as_deref() {
            None | Some("dapr") => StateStoreBackend::Dapr,
            Some("memory") => StateStoreBackend::Memory,
            Some(other) => {
                return Err(anyhow!(
                    "STATE_STORE_BACKEND must be 'dapr' or 'memory', got '{other}'"
                ));
            }
        };

        let store_name = var("STATE_STORE_NAME").unwrap_or_else(|| "orders".to_string());
        let dapr_host = var("DAPR_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let dapr_http_port = var("DAPR_HTTP_PORT")
            .unwrap_or_else(|| "3500".to_string())
            .parse::<u16>()
            .context("DAPR_HTTP_PORT must be a valid u16 integer")?;

        let wait_secs = var("STATE_STORE_WAIT_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u64>()
            .context("Unable to parse STATE_STORE_WAIT_SECS as u64")?;

        let bulk_parallelism = var("BULK_PARALLELISM")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .context("Unable to parse BULK_PARALLELISM as u32")?;

        let query_page_limit = var("QUERY_PAGE_LIMIT")
            .unwrap_or_else(|| "100".to_string())
            .parse::<u32>()
            .context("Unable to parse QUERY_PAGE_LIMIT as u32")?;

        if bulk_parallelism == 0 || query_page_limit == 0 {
            return Err(anyhow!(
                "BULK_PARALLELISM and QUERY_PAGE_LIMIT must be greater than zero"
            ));
        }

        let is_dev = var("DEV_MODE").is_some_and(|v| v == "true" || v == "1");
        let enable_file_log = var("ENABLE_FILE_LOG").is_some_and(|v| v == "true");

        let mut dapr = DaprConfig::new(dapr_host, dapr_http_port, store_name);
        dapr.api_token = var("DAPR_API_TOKEN");
        dapr.query_page_limit = query_page_limit;

        Ok(Self {
            port,
            backend,
            dapr,
            wait_timeout: Duration::from_secs(wait_secs),
            bulk_parallelism,
            is_dev,
            enable_file_log,
            otel_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig::new(SERVICE_NAME);
        config.is_dev = self.is_dev;
        config.enable_file = self.enable_file_log;
        config
    }
}
