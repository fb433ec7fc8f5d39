use anyhow::{Context, Result};
use order::{
    config::{Config, myconfig::SERVICE_NAME},
    handler::AppRouter,
    state::AppState,
};
use shared::utils::{Telemetry, init_logger};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init(SERVICE_NAME, config.otel_endpoint.as_deref())
        .context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(&config.log_config(), telemetry.logger_provider())
        .context("Failed to initialize logger")?;

    match telemetry.endpoint() {
        Some(endpoint) => info!("Exporting telemetry for {SERVICE_NAME} to {endpoint}"),
        None => info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, telemetry export disabled"),
    }

    let state = AppState::from_config(&config).context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down...");

    if let Err(e) = telemetry.shutdown().await {
        error!("Failed to shutdown telemetry: {e}");
    }

    info!("✅ Order service shutdown complete.");

    Ok(())
}
