use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use classlog_server::api::{self, AppState};
use classlog_server::config::AppConfig;
use classlog_server::{db, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting classlog server");
    let config = AppConfig::from_env().context("failed to load configuration from environment")?;
    info!(database_url = %config.database_url, "connecting to database");

    let db = db::init_pool_and_migrate(&config.database_url)
        .await
        .context("failed to connect to the database and run migrations")?;

    let state = Arc::new(AppState::new(db));
    seed::seed_if_empty(&state)
        .await
        .context("failed to insert the seed dataset")?;

    let app = api::create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
