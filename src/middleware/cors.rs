//! Middleware de CORS
//!
//! Sin orígenes configurados se permite cualquiera (solo desarrollo).

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Crear middleware de CORS a partir de la lista de orígenes
pub fn cors_middleware(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}
