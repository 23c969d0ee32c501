//! Axum router configuration with middleware.
//!
//! The route table is the hub's A2A discovery surface: `GET /` advertises
//! every other endpoint, so external agents can find the registry and the
//! event stream from the root document alone.
//! Middleware: CORS (allow-all, the hub serves browser dashboards), tracing.

use std::collections::HashMap;

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Protocol discovery document served at `/`.
#[derive(Debug, Serialize)]
pub struct DiscoveryInfo {
    pub protocol: String,
    pub version: String,
    pub endpoints: HashMap<String, String>,
}

impl DiscoveryInfo {
    fn current() -> Self {
        let endpoints = HashMap::from([
            ("list_agents".to_string(), "/agents".to_string()),
            ("register_agent".to_string(), "/agent".to_string()),
            ("ws".to_string(), "/ws".to_string()),
            ("chat_messages".to_string(), "/chat/messages".to_string()),
        ]);
        Self {
            protocol: "A2A".to_string(),
            version: "1.0".to_string(),
            endpoints,
        }
    }
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(get_root_info))
        .route("/agents", get(handlers::agent::list_agents))
        .route("/agent", post(handlers::agent::register_agent))
        .route("/ws", get(handlers::ws::ws_handler))
        .route(
            "/chat/messages",
            get(handlers::chat::get_history).post(handlers::chat::post_message),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Protocol discovery document.
async fn get_root_info() -> axum::Json<DiscoveryInfo> {
    axum::Json(DiscoveryInfo::current())
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
