// src/lib.rs

//! CarbonTrack emission calculator
//!
//! Estimates the CO2 mass of everyday activities, keeps every calculation in
//! a SQLite history and derives statistics and recommendations from it.
//!
//! # Architecture
//!
//! - Factor table: immutable category -> activity -> kg CO2 per unit
//! - Calculator: pure `amount * factor` with input normalization
//! - Record store: append-only SQLite table, one row per calculation
//! - Aggregator: totals, per-category breakdown, percentages, recommendations

pub mod calculator;
pub mod config;
pub mod db;
pub mod equivalents;
mod error;
pub mod factors;
pub mod stats;
pub mod tracker;

#[cfg(feature = "server")]
pub mod server;

pub use calculator::{compute, compute_with_unit, CalculationOutcome};
pub use config::CarbonConfig;
pub use db::models::{EmissionRecord, NewEmission};
pub use equivalents::{equivalents, Equivalents};
pub use error::{Error, Result};
pub use factors::FactorTable;
pub use stats::{statistics, Stats, StatsOutcome};
