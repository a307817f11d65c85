// src/server/handlers/stats.rs
//! Aggregate statistics endpoint

use super::{with_connection, OrderedMap};
use crate::equivalents::{round_to, Equivalents};
use crate::server::ServerState;
use crate::stats::{CategoryBreakdown, Stats, StatsOutcome};
use crate::tracker;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Returned while the store has no records
pub const EMPTY_MESSAGE: &str = "No data yet. Make some calculations first!";

#[derive(Serialize)]
pub struct EmptyNotice {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct Summary {
    pub total_emissions_kg: f64,
    pub total_records: usize,
    pub daily_average_kg: f64,
    pub recording_period_days: i64,
}

#[derive(Serialize)]
pub struct CategoryView {
    pub total: f64,
    pub count: usize,
    pub activities: OrderedMap<String, f64>,
    pub percentage: f64,
}

impl From<&CategoryBreakdown> for CategoryView {
    fn from(entry: &CategoryBreakdown) -> Self {
        Self {
            total: round_to(entry.total_kg, 2),
            count: entry.count,
            activities: OrderedMap(
                entry
                    .activities
                    .iter()
                    .map(|a| (a.activity.clone(), round_to(a.total_kg, 2)))
                    .collect(),
            ),
            percentage: entry.percentage,
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub summary: Summary,
    pub breakdown: OrderedMap<String, CategoryView>,
    pub equivalents: Equivalents,
    pub recommendations: Vec<String>,
}

impl From<&Stats> for StatsResponse {
    fn from(stats: &Stats) -> Self {
        Self {
            summary: Summary {
                total_emissions_kg: round_to(stats.total_co2_kg, 2),
                total_records: stats.total_records,
                daily_average_kg: round_to(stats.daily_average_kg, 2),
                recording_period_days: stats.recording_period_days,
            },
            breakdown: OrderedMap(
                stats
                    .breakdown
                    .iter()
                    .map(|b| (b.category.clone(), CategoryView::from(b)))
                    .collect(),
            ),
            equivalents: stats.equivalents,
            recommendations: stats.recommendations.clone(),
        }
    }
}

/// GET /stats
///
/// An empty store is a normal 200 response carrying a notice.
pub async fn get_statistics(State(state): State<Arc<ServerState>>) -> Response {
    let db_path = state.config.db_path.clone();

    match with_connection(db_path, |conn| tracker::statistics(conn)).await {
        Ok(StatsOutcome::Empty) => Json(EmptyNotice {
            message: EMPTY_MESSAGE,
        })
        .into_response(),
        Ok(StatsOutcome::Report(stats)) => Json(StatsResponse::from(&stats)).into_response(),
        Err(response) => response,
    }
}
