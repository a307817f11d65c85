// src/db/mod.rs

//! SQLite-backed record store
//!
//! All emission records live in a single SQLite database file. Connections are
//! cheap to open, so callers open one per unit of work; SQLite's write lock
//! serializes concurrent appends.

pub mod models;
pub mod schema;

use crate::error::{Error, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// How long a writer waits for the lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create the database (and parent directories) and bring the schema up to date
pub fn init(db_path: impl AsRef<Path>) -> Result<()> {
    let db_path = db_path.as_ref();
    info!("Initializing database at {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = open(db_path)?;
    schema::migrate(&conn)?;
    Ok(())
}

/// Open an existing database with the connection settings the store relies on
pub fn open(db_path: impl AsRef<Path>) -> Result<Connection> {
    let db_path = db_path.as_ref();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(Error::InitError(format!(
                "database directory {} does not exist",
                parent.display()
            )));
        }
    }

    let conn = Connection::open(db_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(conn)
}

/// Open the database, creating and migrating it on first use
pub fn open_or_init(db_path: impl AsRef<Path>) -> Result<Connection> {
    let db_path = db_path.as_ref();
    init(db_path)?;
    open(db_path)
}

/// Run `f` inside a write transaction, committing only if it succeeds.
///
/// The transaction takes the write lock up front (`BEGIN IMMEDIATE`) so that
/// reads performed inside `f` see the state the write will be based on.
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}
