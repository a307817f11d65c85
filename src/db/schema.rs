// src/db/schema.rs

//! Database schema definitions for CarbonTrack
//!
//! The schema is versioned through a `schema_version` table so a database
//! created by an older build is brought forward on open.

use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the schema version tracking table
fn init_schema_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    init_schema_version(conn)?;

    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Apply all pending schema versions
pub fn migrate(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    debug!("Current schema version: {}", current_version);

    if current_version >= SCHEMA_VERSION {
        debug!("Schema is up to date");
        return Ok(());
    }

    for version in (current_version + 1)..=SCHEMA_VERSION {
        info!("Applying schema version {}", version);
        apply_version(conn, version)?;
        set_schema_version(conn, version)?;
    }

    Ok(())
}

fn apply_version(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => create_v1(conn),
        _ => Err(Error::InitError(format!(
            "Unknown schema version: {version}"
        ))),
    }
}

/// Version 1: the emissions table
///
/// Timestamps are fixed-width RFC 3339 UTC strings, so text order is time order.
fn create_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE emissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category TEXT NOT NULL,
            activity TEXT NOT NULL,
            amount REAL NOT NULL,
            unit TEXT NOT NULL,
            co2_kg REAL NOT NULL,
            timestamp TEXT NOT NULL,
            owner TEXT NOT NULL DEFAULT 'demo_user'
        );

        CREATE INDEX idx_emissions_category ON emissions(category);
        CREATE INDEX idx_emissions_timestamp ON emissions(timestamp);
        ",
    )?;
    Ok(())
}
