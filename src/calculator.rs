// src/calculator.rs

//! Emission calculator
//!
//! Turns an activity record into a CO2 mass using the factor table. The
//! calculation is pure: nothing is persisted here.

use crate::equivalents::round_to;
use crate::error::Result;
use crate::factors::FactorTable;
use serde::Serialize;

/// Result of a single calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationOutcome {
    pub category: String,
    pub activity: String,
    pub amount: f64,
    pub unit: String,
    /// Full-precision mass; round only for display
    pub co2_kg: f64,
    pub factor_used: f64,
}

impl CalculationOutcome {
    /// CO2 mass rounded to 2 decimals for presentation
    pub fn co2_kg_rounded(&self) -> f64 {
        round_to(self.co2_kg, 2)
    }
}

/// Compute the CO2 mass for an activity using the category's default unit.
///
/// `amount` is deliberately unvalidated: zero or negative quantities produce
/// zero or negative masses.
pub fn compute(
    table: &FactorTable,
    category: &str,
    activity: &str,
    amount: f64,
) -> Result<CalculationOutcome> {
    compute_with_unit(table, category, activity, amount, None)
}

/// Compute the CO2 mass, labelling the result with `unit` when one is given
pub fn compute_with_unit(
    table: &FactorTable,
    category: &str,
    activity: &str,
    amount: f64,
    unit: Option<&str>,
) -> Result<CalculationOutcome> {
    let category = category.trim().to_lowercase();
    let activity = activity.trim().to_lowercase();

    let factor = table.lookup(&category, &activity)?;

    let unit = match unit.map(str::trim) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => table.default_unit(&category).to_string(),
    };

    Ok(CalculationOutcome {
        category,
        activity,
        amount,
        unit,
        co2_kg: amount * factor,
        factor_used: factor,
    })
}
