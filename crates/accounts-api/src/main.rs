//! `accounts-api` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise telemetry (JSON logs, optional OTLP export).
//! 3. Build the account table and session store.
//! 4. Build the Axum router and serve until Ctrl-C.

mod accounts;
mod config;
mod protocol;
mod server;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use http_errors::TracingLogger;
use tracing::{info, warn};

use accounts::SessionStore;
use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otlp_endpoint(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        otlp = cfg.otlp_endpoint().is_some(),
        "accounts-api starting"
    );

    // -----------------------------------------------------------------------
    // 3. Accounts and sessions
    // -----------------------------------------------------------------------
    let accounts = cfg.accounts()?;
    info!(accounts = accounts.len(), max_sessions = cfg.max_sessions, "accounts loaded");
    let state = AppState::new(
        accounts,
        SessionStore::new(cfg.max_sessions),
        Arc::new(TracingLogger),
    );

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(state, cfg.request_timeout());

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("accounts-api stopped");
    telemetry::shutdown_telemetry();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
