use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mflix_api::cli::Cli;
use mflix_api::config::AppConfig;
use mflix_api::database::DatabaseManager;
use mflix_api::{build_app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGODB_URI and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mflix_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config: AppConfig = cli.apply(mflix_api::config::config().clone());
    tracing::info!("Starting mflix API in {:?} mode", config.environment);

    let store = DatabaseManager::open(&config.database).context("failed to open document store")?;
    let app = build_app_router(AppState::new(store), &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("mflix API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
