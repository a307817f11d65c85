// src/server/handlers/calculate.rs
//! Emission calculation endpoint

use super::with_connection;
use crate::equivalents::Equivalents;
use crate::server::ServerState;
use crate::tracker;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Request body for a calculation
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub category: String,
    pub activity: String,
    pub amount: f64,
    /// Informational; defaults to the category's unit
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Serialize)]
pub struct CalculationBody {
    pub category: String,
    pub activity: String,
    pub amount: f64,
    pub unit: String,
    /// Rounded to 2 decimals; the stored value keeps full precision
    pub co2_kg: f64,
    pub factor_used: f64,
    pub equivalents: Equivalents,
}

#[derive(Serialize)]
pub struct CalculateResponse {
    pub success: bool,
    pub id: i64,
    pub calculation: CalculationBody,
    pub timestamp: String,
}

/// POST /calculate
///
/// Returns:
/// - 200 OK with the stored calculation
/// - 400 Bad Request for an unknown category or activity, listing valid names
pub async fn calculate(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CalculateRequest>,
) -> Response {
    debug!(
        "Calculate request: {}/{} amount={}",
        request.category, request.activity, request.amount
    );

    let db_path = state.config.db_path.clone();
    let factors = Arc::clone(&state.factors);

    let result = with_connection(db_path, move |conn| {
        tracker::record_calculation(
            conn,
            &factors,
            &request.category,
            &request.activity,
            request.amount,
            request.unit.as_deref(),
        )
    })
    .await;

    let recorded = match result {
        Ok(recorded) => recorded,
        Err(response) => return response,
    };

    let outcome = &recorded.outcome;
    let response = CalculateResponse {
        success: true,
        id: recorded.record.id,
        calculation: CalculationBody {
            category: outcome.category.clone(),
            activity: outcome.activity.clone(),
            amount: outcome.amount,
            unit: outcome.unit.clone(),
            co2_kg: outcome.co2_kg_rounded(),
            factor_used: outcome.factor_used,
            equivalents: recorded.equivalents,
        },
        timestamp: recorded.record.timestamp.to_rfc3339(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
