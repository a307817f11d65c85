// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use carbontrack::db;
use carbontrack::db::models::{EmissionRecord, NewEmission};
use carbontrack::{compute, FactorTable};
use chrono::{DateTime, Utc};
use tempfile::TempDir;

/// Create an empty, initialized test database.
///
/// Returns (TempDir, db_path) - keep the TempDir alive to prevent cleanup.
pub fn setup_test_db() -> (TempDir, String) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("carbon.db")
        .to_str()
        .unwrap()
        .to_string();

    db::init(&db_path).unwrap();
    (temp_dir, db_path)
}

/// Compute with the built-in table and store the result at a fixed instant
pub fn record_at(
    db_path: &str,
    category: &str,
    activity: &str,
    amount: f64,
    at: DateTime<Utc>,
) -> EmissionRecord {
    let table = FactorTable::builtin();
    let outcome = compute(&table, category, activity, amount).unwrap();
    let mut conn = db::open(db_path).unwrap();
    EmissionRecord::append_at(&mut conn, &NewEmission::from(&outcome), at).unwrap()
}
