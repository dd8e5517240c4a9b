//! Bikeval Server - used motorbike price estimation API
//!
//! Loads the label encoders, scaler and regression model once, then serves
//! predictions over HTTP until Ctrl+C.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=model/ensemble_model.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `BIKEVAL_BIND_ADDRESS` / `BIKEVAL_PORT` - Listen address (default: 127.0.0.1:5000)
//! - `MODEL_PATH`, `SCALER_PATH`, `LABEL_ENCODERS_PATH` - Artifact locations
//! - `MODEL_BACKEND` - Force `smartcore` or `onnx` instead of inferring from the extension
//! - `CORS_ENABLED` - Allow cross-origin form clients (default: true)

use anyhow::{Context, Result};
use bikeval::application::valuation_service::ValuationService;
use bikeval::config::Config;
use bikeval::infrastructure::{SystemYear, load_artifacts};
use bikeval::interfaces::create_router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Bikeval Server {} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: model={:?} ({}), scaler={:?}, encoders={:?}",
        config.artifacts.model_path,
        config.artifacts.resolved_backend().as_str(),
        config.artifacts.scaler_path,
        config.artifacts.label_encoders_path
    );

    // Artifacts are mandatory: refuse to serve without them
    let artifacts = load_artifacts(&config.artifacts)?;
    let service = Arc::new(ValuationService::new(artifacts, Arc::new(SystemYear)));

    let app = create_router(service, config.server.cors_enabled);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Listening on http://{addr}. Press Ctrl+C to shutdown.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Draining connections...");
}
