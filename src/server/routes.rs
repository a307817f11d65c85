// src/server/routes.rs
//! Axum router configuration for the CarbonTrack server

use crate::server::handlers::{calculate, categories, history, info, stats};
use crate::server::ServerState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Create the main application router
pub fn create_router(state: Arc<ServerState>) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/", get(info::root))
        .route("/health", get(info::health_check))
        .route("/categories", get(categories::list_categories))
        .route("/calculate", post(calculate::calculate))
        .route("/history", get(history::get_history))
        .route("/stats", get(stats::get_statistics))
        .with_state(state)
        .layer(cors)
}

/// Permissive CORS unless specific origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
