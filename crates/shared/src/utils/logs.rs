use anyhow::{Context, Result};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

const EXPORT_FILTER: &str = "info,hyper=off,opentelemetry=off,tonic=off,h2=off,reqwest=off";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub component: String,
    pub is_dev: bool,
    pub enable_file: bool,
    /// Fallback console filter when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl LogConfig {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            is_dev: false,
            enable_file: false,
            default_filter: "info".to_string(),
        }
    }

    fn log_dir(&self) -> &'static str {
        if self.is_dev { "./logs" } else { "/var/log/app" }
    }
}

/// Installs the global subscriber: console, optional rolling JSON file, and
/// the OpenTelemetry log bridge when a provider is given.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logger(
    config: &LogConfig,
    sdk_logger_provider: Option<&SdkLoggerProvider>,
) -> Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let console_layer = if config.is_dev {
        fmt::layer()
            .pretty()
            .with_thread_names(true)
            .with_ansi(true)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_filter(console_filter)
            .boxed()
    };

    let (file_layer, guard) = if config.enable_file {
        let file_name = format!("rust_app_{}.log", config.component);
        let file_appender = RollingFileAppender::new(Rotation::DAILY, config.log_dir(), file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let otel_layer = sdk_logger_provider.map(|provider| {
        OpenTelemetryTracingBridge::new(provider).with_filter(EnvFilter::new(EXPORT_FILTER))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(otel_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
