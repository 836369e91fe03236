//! HTTP API for the weather agent.

mod chat;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::agent::Agent;
use crate::config::Config;

/// Shared state for all routes. Built once at startup; per-request
/// conversation state never lives here.
pub struct AppState {
    pub agent: Agent,
}

/// Build the router with all routes.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/health", get(chat::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and serve until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let state = Arc::new(AppState {
        agent: Agent::new(config),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, routes(state)).await?;

    Ok(())
}
