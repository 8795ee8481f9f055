//! Jarvis Workstation Daemon - Main Entry Point
//!
//! Composition root: logging, config, SQLite memory log, subprocess runner,
//! HTTP API.

mod config;

use anyhow::{Context, Result};
use config::{DaemonConfig, LogFormat};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jarvis_api_http::{AppState, HttpServer};
use jarvis_core::application::constants::DEFAULT_ENV_ALLOWLIST;
use jarvis_core::application::{MemoryService, OperationService};
use jarvis_core::port::id_provider::UuidProvider;
use jarvis_core::port::time_provider::SystemTimeProvider;
use jarvis_infra_sqlite::{create_pool, run_migrations, SqliteMemoryStore};
use jarvis_infra_system::SubprocessRunner;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env();

    // 2. Initialize logging
    init_logging(config.log_format)?;
    info!("Jarvis daemon v{} starting...", jarvis_core::VERSION);
    info!(
        root = %config.pipeline.root.display(),
        node_bin = %config.pipeline.node_bin,
        serialize_mutations = config.pipeline.serialize_mutations,
        "Pipeline configuration loaded"
    );

    // 3. Initialize database
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    let db_path = config.db_path.display().to_string();
    info!(db_path = %db_path, "Initializing memory log...");

    let pool = create_pool(&db_path)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);

    let runner = Arc::new(SubprocessRunner::new(
        time_provider.clone(),
        DEFAULT_ENV_ALLOWLIST.iter().map(|s| s.to_string()).collect(),
    ));
    let operations = Arc::new(OperationService::new(
        runner,
        time_provider.clone(),
        config.pipeline.clone(),
    ));
    let memory = Arc::new(MemoryService::new(
        Arc::new(SqliteMemoryStore::new(pool.clone())),
        id_provider,
        time_provider,
    ));

    // 5. Serve HTTP until Ctrl+C
    let server = HttpServer::new(config.http.clone(), Arc::new(AppState::new(operations, memory)));
    info!("Press Ctrl+C to shutdown");

    server
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received. Exiting gracefully...");
        })
        .await
        .context("HTTP server failed")?;

    pool.close().await;
    info!("Shutdown complete.");

    Ok(())
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("jarvis=info"))
        .context("Failed to create env filter")?;

    match format {
        // Production: JSON structured logging
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init(),
        // Development: Pretty formatting with colors
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .init(),
    }

    Ok(())
}
