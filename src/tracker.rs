// src/tracker.rs

//! Calculate-and-record pipeline shared by the HTTP server and the CLI
//!
//! Each function works on one open connection and maps directly onto one
//! external operation: calculate, history, statistics.

use crate::calculator::{self, CalculationOutcome};
use crate::db::models::{EmissionRecord, NewEmission};
use crate::equivalents::{Equivalents, equivalents};
use crate::error::Result;
use crate::factors::FactorTable;
use crate::stats::{self, StatsOutcome};
use rusqlite::Connection;

/// A calculation that has been persisted
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCalculation {
    pub outcome: CalculationOutcome,
    pub equivalents: Equivalents,
    pub record: EmissionRecord,
}

/// Recent records and the total of just those records
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub records: Vec<EmissionRecord>,
    pub total_co2_kg: f64,
}

/// Compute the emission for an activity and store it.
///
/// Lookup errors are returned before anything is written.
pub fn record_calculation(
    conn: &mut Connection,
    table: &FactorTable,
    category: &str,
    activity: &str,
    amount: f64,
    unit: Option<&str>,
) -> Result<RecordedCalculation> {
    let outcome = calculator::compute_with_unit(table, category, activity, amount, unit)?;
    let record = EmissionRecord::append(conn, &NewEmission::from(&outcome))?;

    Ok(RecordedCalculation {
        equivalents: equivalents(outcome.co2_kg),
        outcome,
        record,
    })
}

/// The most recent `limit` records, newest first
pub fn history(conn: &Connection, limit: u32) -> Result<History> {
    let records = EmissionRecord::list_recent(conn, limit)?;
    let total_co2_kg = records.iter().map(|r| r.co2_kg).sum();
    Ok(History {
        records,
        total_co2_kg,
    })
}

/// Aggregate every stored record
pub fn statistics(conn: &Connection) -> Result<StatsOutcome> {
    let records = EmissionRecord::list_all(conn)?;
    Ok(stats::statistics(&records))
}
