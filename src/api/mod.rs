//! HTTP surface.
//!
//! Versioned JSON API over the domain services. Routing and state wiring
//! live here; request/response schemas sit next to their handlers.

pub mod admin;
pub mod auth;
pub mod error;
pub mod portfolio;
pub mod trades;

use axum::routing::{get, patch, post};
use axum::{Json, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::persistence::DbPool;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/trades", post(trades::create_trade).get(trades::list_trades))
        .route("/trades/:trade_id/close", patch(trades::close_trade))
        .route("/portfolio/summary", get(portfolio::summary))
        .route("/admin/trades", get(admin::list_all_trades));

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(detailed_health))
        .nest("/api/v1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "app": "Crypto Trade Logger",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Detailed health check for monitoring systems
async fn detailed_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "database": "connected",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
