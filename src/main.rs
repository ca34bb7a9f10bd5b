//! MoveBase security engine server.
//!
//! Main entry point that wires the store, engine, and HTTP boundary
//! together and starts the server. Initialization happens exactly once
//! here; every component receives injected handles.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use movebase_auth::audit::TracingAuditSink;
use movebase_core::config::AppConfig;
use movebase_core::error::AppError;
use movebase_core::traits::KeyValueStore;
use movebase_store::StoreManager;

#[tokio::main]
async fn main() {
    let env = std::env::var("MOVEBASE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MoveBase security engine v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: store provider ───────────────────────────────────
    tracing::info!(provider = %config.store.provider, "Initializing store");
    let store = Arc::new(StoreManager::new(&config.store).await?);

    // ── Step 2: engine state ─────────────────────────────────────
    let state = movebase_api::AppState::build(
        config.clone(),
        store.clone(),
        Arc::new(TracingAuditSink::new()),
    );

    // ── Step 3: periodic sweep ───────────────────────────────────
    if config.session.sweep_enabled {
        let cleanup = state.session_cleanup.clone();
        let rate_limiter = state.rate_limiter.clone();
        let sweep_store = store.clone();
        let interval = Duration::from_secs(config.session.sweep_interval_minutes * 60);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // first tick fires immediately
            loop {
                ticker.tick().await;
                if let Err(e) = cleanup.run_sweep().await {
                    tracing::error!(error = %e, "Session sweep failed");
                }
                if let Err(e) = sweep_store.sweep_expired().await {
                    tracing::error!(error = %e, "Store sweep failed");
                }
                let pruned = rate_limiter.prune_idle(interval * 2).await;
                if pruned > 0 {
                    tracing::debug!(pruned, "Pruned idle rate-limit buckets");
                }
            }
        });
        tracing::info!(
            interval_minutes = config.session.sweep_interval_minutes,
            "Session sweep scheduled"
        );
    }

    // ── Step 4: HTTP server ──────────────────────────────────────
    let app = movebase_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("MoveBase security engine listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("MoveBase security engine shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
