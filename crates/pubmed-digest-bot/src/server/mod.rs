//! Health check HTTP server.
//!
//! Container platforms probe `/` or `/health` to decide whether the bot
//! process is alive. Nothing here touches PubMed or Telegram.

use std::net::SocketAddr;

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// Service name reported by the health endpoints.
pub const SERVICE_NAME: &str = "pubmed-digest-bot";

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Always `"ok"` while the process answers.
    pub status: &'static str,

    /// Service name.
    pub service: &'static str,

    /// Crate version.
    pub version: &'static str,
}

impl HealthStatus {
    /// Status of a running process.
    #[must_use]
    pub const fn ok() -> Self {
        Self { status: "ok", service: SERVICE_NAME, version: env!("CARGO_PKG_VERSION") }
    }
}

/// Create the health router.
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}

/// Bind the health server port on all interfaces.
///
/// # Errors
///
/// Returns error if the port cannot be bound.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await
}

/// Serve the health router until Ctrl+C.
///
/// # Errors
///
/// Returns error if the server fails.
pub async fn run_health_server(listener: TcpListener) -> anyhow::Result<()> {
    tracing::info!("Health server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router()).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Health server shut down");
    Ok(())
}

/// Spawn the health server, logging an error if it stops serving.
pub fn spawn_health_server(listener: TcpListener) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = run_health_server(listener).await {
            tracing::error!(error = %err, "Health server failed");
        }
    })
}

async fn liveness() -> &'static str {
    "PubMed digest bot is running!"
}

async fn health_check() -> impl IntoResponse {
    Json(HealthStatus::ok())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
