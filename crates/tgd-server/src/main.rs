//! TGD Server - Main entry point

use anyhow::Result;
use std::{net::SocketAddr, time::Duration};
use tgd_common::logging::{init_logging, LogConfig};
use tokio::signal;
use tracing::info;

use tgd_server::{api, config::Config, db};

const DEFAULT_LOG_FILTER: &str = "tgd_server=debug,tower_http=debug,axum=info,sqlx=warn";

#[tokio::main]
async fn main() -> Result<()> {
    let mut log_config = LogConfig::from_env().unwrap_or_else(|_| LogConfig::new());
    if log_config.filter_directives.is_none() {
        log_config.filter_directives = Some(DEFAULT_LOG_FILTER.to_string());
    }
    if std::env::var("LOG_FILE_PREFIX").is_err() {
        log_config.log_file_prefix = "tgd-server".to_string();
    }

    // Held for the lifetime of the process so buffered file logs are flushed
    let _log_guard = init_logging(&log_config)?;

    info!("Starting TGD Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    let app = api::router(pool, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
