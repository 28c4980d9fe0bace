pub mod record_routes;
pub mod session_routes;

use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la API
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/session", session_routes::create_session_router())
        .nest("/api/records", record_routes::create_record_router(state.clone()))
        .layer(DefaultBodyLimit::max(state.config.body_limit_bytes))
        .layer(cors_middleware(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
