use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use sqlx::{Pool, Postgres};
use storefront::{config::Config, handler::AppRouter, state::AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("storefront", config.otel_endpoint.clone());

    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize log exporter")?;
    telemetry
        .init_meter()
        .context("Failed to initialize metric exporter")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize span exporter")?;

    init_logger(logger_provider, "storefront", is_dev, is_enable_file);

    let pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        info!("Running database migrations...");
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Migrations completed successfully");
    }

    let state = AppState::new(pool, &config)
        .await
        .context("Failed to create AppState")?;

    info!("🚀 Storefront starting on port {}", config.port);

    let served = AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server");

    info!("Shutting down servers...");

    if let Err(e) = telemetry.shutdown().await {
        error!("Failed to shutdown telemetry: {e}");
    }

    served
}

pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
