mod gracefullshutdown;
mod logs;
mod metadata;
mod metrics;
mod otel;
mod parse_date;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::{LogConfig, init_logger};
pub use self::metadata::HeaderInjector;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::otel::{Telemetry, TracingContext};
pub use self::parse_date::parse_date;
