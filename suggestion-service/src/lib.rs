pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::{AppState, Application};

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use service_core::middleware::permissive_cors;
use tower_http::trace::TraceLayer;

/// Health check endpoint for liveness probes.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "suggestion-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ai-suggestions", post(handlers::ai_suggestions))
        .with_state(state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
}
