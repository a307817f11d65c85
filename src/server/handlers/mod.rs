// src/server/handlers/mod.rs
//! HTTP request handlers for the CarbonTrack server

pub mod calculate;
pub mod categories;
pub mod history;
pub mod info;
pub mod stats;

use crate::error::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rusqlite::Connection;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::PathBuf;

/// Serializes as a JSON object while keeping insertion order
pub struct OrderedMap<K, V>(pub Vec<(K, V)>);

impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Map an engine error to an HTTP response
pub fn error_response(err: &Error) -> Response {
    let code = match err {
        Error::UnknownCategory { .. } => "unknown_category",
        Error::UnknownActivity { .. } => "unknown_activity",
        _ => "storage_error",
    };

    if err.is_client_error() {
        let body = serde_json::json!({
            "error": code,
            "message": err.to_string(),
            "available": err.remediation().unwrap_or_default(),
        });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    tracing::error!("Request failed: {}", err);
    let body = serde_json::json!({
        "error": code,
        "message": "Failed to access emission records",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Run blocking database work on the blocking pool with a fresh connection
pub async fn with_connection<T, F>(db_path: PathBuf, f: F) -> Result<T, Response>
where
    F: FnOnce(&mut Connection) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || -> crate::Result<T> {
        let mut conn = crate::db::open(&db_path)?;
        f(&mut conn)
    })
    .await;

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(error_response(&err)),
        Err(err) => {
            tracing::error!("Database task failed: {}", err);
            let body = serde_json::json!({
                "error": "internal_error",
                "message": "Database task failed",
            });
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}
