// src/server/handlers/categories.rs
//! Factor table discovery endpoint

use super::OrderedMap;
use crate::factors::CategoryFactors;
use crate::server::ServerState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct CategoryInfo {
    pub activities: Vec<String>,
    pub default_unit: String,
    /// kg CO2 per unit, keyed by activity
    pub factors: OrderedMap<String, f64>,
}

impl From<&CategoryFactors> for CategoryInfo {
    fn from(category: &CategoryFactors) -> Self {
        Self {
            activities: category.activity_names(),
            default_unit: category.default_unit.clone(),
            factors: OrderedMap(
                category
                    .activities
                    .iter()
                    .map(|a| (a.name.clone(), a.factor))
                    .collect(),
            ),
        }
    }
}

#[derive(Serialize)]
pub struct ExamplePayload {
    pub category: String,
    pub activity: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: OrderedMap<String, CategoryInfo>,
    pub example_payload: Option<ExamplePayload>,
}

/// GET /categories
///
/// Lists every category with its activities, factors and default unit.
pub async fn list_categories(State(state): State<Arc<ServerState>>) -> Json<CategoriesResponse> {
    let table = &state.factors;

    let categories = table
        .categories()
        .iter()
        .map(|c| (c.name.clone(), CategoryInfo::from(c)))
        .collect();

    // First activity of the first category makes a valid example
    let example_payload = table.categories().first().and_then(|c| {
        c.activities.first().map(|a| ExamplePayload {
            category: c.name.clone(),
            activity: a.name.clone(),
            amount: 100.0,
            unit: c.default_unit.clone(),
        })
    });

    Json(CategoriesResponse {
        categories: OrderedMap(categories),
        example_payload,
    })
}
