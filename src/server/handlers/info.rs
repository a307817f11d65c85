// src/server/handlers/info.rs
//! Service info and health endpoints

use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// GET /
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "CarbonTrack API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "GET  / - This info",
            "GET  /categories - List all activities",
            "POST /calculate - Calculate emissions",
            "GET  /history - Get past calculations",
            "GET  /stats - Get statistics",
            "GET  /health - Health check",
        ],
    })
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}
