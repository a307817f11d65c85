// src/server/handlers/history.rs
//! Calculation history endpoint

use super::with_connection;
use crate::db::models::EmissionRecord;
use crate::equivalents::round_to;
use crate::server::ServerState;
use crate::tracker;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for history requests
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of records (server default if omitted)
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub category: String,
    pub activity: String,
    pub amount: f64,
    pub unit: String,
    pub co2_kg: f64,
    pub timestamp: String,
}

impl From<EmissionRecord> for HistoryRecord {
    fn from(record: EmissionRecord) -> Self {
        Self {
            id: record.id,
            category: record.category,
            activity: record.activity,
            amount: record.amount,
            unit: record.unit,
            co2_kg: round_to(record.co2_kg, 2),
            timestamp: record.timestamp.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub total_records: usize,
    /// Total of the listed records only
    pub total_co2_kg: f64,
    pub records: Vec<HistoryRecord>,
}

/// GET /history?limit=N
pub async fn get_history(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(state.config.history_limit);
    let db_path = state.config.db_path.clone();

    match with_connection(db_path, move |conn| tracker::history(conn, limit)).await {
        Ok(history) => Json(HistoryResponse {
            total_records: history.records.len(),
            total_co2_kg: round_to(history.total_co2_kg, 2),
            records: history.records.into_iter().map(HistoryRecord::from).collect(),
        })
        .into_response(),
        Err(response) => response,
    }
}
