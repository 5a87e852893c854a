//! # ak-server
//!
//! HTTP front end for agent-kit. Exposes the chat-extension endpoint, a
//! direct dispatch endpoint, health and listing endpoints and direct tool
//! calls, all backed by one shared [`Dispatcher`]. The [`mcp`] module serves
//! the same tools over MCP stdio.

pub mod mcp;
pub mod routes;

use ak_core::dispatch::Dispatcher;
use ak_protocol::config_models::ServerConfig;
use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use routes::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Build the application router around `dispatcher`.
pub fn router(dispatcher: Dispatcher) -> Router {
    let state = Arc::new(AppState { dispatcher });

    Router::new()
        .route("/", post(routes::chat))
        .route("/dispatch", post(routes::dispatch))
        .route("/health", get(routes::health))
        .route("/agents", get(routes::agents))
        .route("/tools", get(routes::tools))
        .route("/tools/:name", post(routes::call_tool))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Bind to the configured address and serve until the process exits.
pub async fn serve(config: &ServerConfig, dispatcher: Dispatcher) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        agents = dispatcher.registry().len(),
        "agent-kit server listening on http://{addr}"
    );

    axum::serve(listener, router(dispatcher))
        .await
        .context("Server error")
}
