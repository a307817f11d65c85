// src/commands/mod.rs
//! Command handlers for the CarbonTrack CLI

use anyhow::{Context, Result};
use carbontrack::db;
use carbontrack::equivalents::round_to;
use carbontrack::stats::StatsOutcome;
use carbontrack::{tracker, CarbonConfig, FactorTable};
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolve the database path: explicit flag wins over config
fn resolve_db_path(config: &CarbonConfig, db_path: Option<PathBuf>) -> PathBuf {
    db_path.unwrap_or_else(|| config.storage.db_path.clone())
}

/// Resolve the factor table: explicit file wins over config
fn resolve_factors(config: &CarbonConfig, factors: Option<PathBuf>) -> Result<FactorTable> {
    match factors {
        Some(path) => FactorTable::load(&path)
            .with_context(|| format!("Failed to load factor file: {}", path.display())),
        None => config.factor_table(),
    }
}

/// Run the HTTP server
#[cfg(feature = "server")]
pub fn cmd_serve(
    config: &CarbonConfig,
    bind: Option<String>,
    db_path: Option<PathBuf>,
    factors: Option<PathBuf>,
) -> Result<()> {
    let mut server_config = config.to_server_config()?;
    if let Some(bind) = bind {
        server_config.bind_addr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;
    }
    if let Some(db_path) = db_path {
        server_config.db_path = db_path;
    }
    let table = resolve_factors(config, factors)?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(carbontrack::server::run_server(server_config, table))
}

/// Initialize the database
pub fn cmd_init(config: &CarbonConfig, db_path: Option<PathBuf>) -> Result<()> {
    let db_path = resolve_db_path(config, db_path);
    db::init(&db_path)
        .with_context(|| format!("Failed to initialize database: {}", db_path.display()))?;
    println!("Database initialized successfully at: {}", db_path.display());
    Ok(())
}

/// List the factor table
pub fn cmd_categories(config: &CarbonConfig, factors: Option<PathBuf>) -> Result<()> {
    let table = resolve_factors(config, factors)?;

    for category in table.categories() {
        println!("{} (per {}):", category.name, category.default_unit);
        for activity in &category.activities {
            println!("  {:<14} {:>8} kg CO2", activity.name, activity.factor);
        }
    }
    Ok(())
}

/// Calculate and record one activity
pub fn cmd_calculate(
    config: &CarbonConfig,
    category: &str,
    activity: &str,
    amount: f64,
    unit: Option<&str>,
    db_path: Option<PathBuf>,
    factors: Option<PathBuf>,
) -> Result<()> {
    let table = resolve_factors(config, factors)?;
    let db_path = resolve_db_path(config, db_path);
    let mut conn = open_db(&db_path)?;

    let recorded = tracker::record_calculation(&mut conn, &table, category, activity, amount, unit)?;
    let outcome = &recorded.outcome;
    info!("Recorded calculation #{}", recorded.record.id);

    println!(
        "[{}] {} {} {} of {}/{} = {} kg CO2 (factor {})",
        recorded.record.id,
        recorded.record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        outcome.amount,
        outcome.unit,
        outcome.category,
        outcome.activity,
        outcome.co2_kg_rounded(),
        outcome.factor_used
    );

    let eq = &recorded.equivalents;
    println!("  Trees needed for a year: {}", eq.trees_needed);
    println!("  Equivalent car km:       {}", eq.km_by_car);
    println!("  Smartphones charged:     {}", eq.smartphones_charged);
    println!("  Hours of TV:             {}", eq.hours_of_tv);
    Ok(())
}

/// Show recent calculations
pub fn cmd_history(config: &CarbonConfig, limit: Option<u32>, db_path: Option<PathBuf>) -> Result<()> {
    let db_path = resolve_db_path(config, db_path);
    let conn = open_db(&db_path)?;
    let limit = limit.unwrap_or(config.calculator.history_limit);
    let history = tracker::history(&conn, limit)?;

    if history.records.is_empty() {
        println!("No calculations recorded.");
        return Ok(());
    }

    println!("Calculation history:");
    for record in &history.records {
        println!(
            "  [{}] {} {}/{} {} {} = {} kg CO2",
            record.id,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.category,
            record.activity,
            record.amount,
            record.unit,
            round_to(record.co2_kg, 2)
        );
    }
    println!(
        "\nTotal: {} record(s), {} kg CO2",
        history.records.len(),
        round_to(history.total_co2_kg, 2)
    );
    Ok(())
}

/// Show aggregate statistics
pub fn cmd_stats(config: &CarbonConfig, db_path: Option<PathBuf>) -> Result<()> {
    let db_path = resolve_db_path(config, db_path);
    let conn = open_db(&db_path)?;

    let stats = match tracker::statistics(&conn)? {
        StatsOutcome::Empty => {
            println!("No data yet. Make some calculations first!");
            return Ok(());
        }
        StatsOutcome::Report(stats) => stats,
    };

    println!("Total emissions: {} kg CO2", round_to(stats.total_co2_kg, 2));
    println!("Records:         {}", stats.total_records);
    println!(
        "Daily average:   {} kg CO2 over {} day(s)",
        round_to(stats.daily_average_kg, 2),
        stats.recording_period_days
    );

    println!("\nBreakdown:");
    for entry in &stats.breakdown {
        println!(
            "  {:<12} {:>10} kg  {:>5}%  ({} record(s))",
            entry.category,
            round_to(entry.total_kg, 2),
            entry.percentage,
            entry.count
        );
        for activity in &entry.activities {
            println!("    {:<14} {:>10} kg", activity.activity, round_to(activity.total_kg, 2));
        }
    }

    println!("\nRecommendations:");
    for rec in &stats.recommendations {
        println!("  - {}", rec);
    }
    Ok(())
}

fn open_db(db_path: &Path) -> Result<rusqlite::Connection> {
    db::open_or_init(db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))
}
