// src/factors.rs

//! Emission factor table
//!
//! Maps category -> activity -> kg CO2 per unit, plus a default unit label per
//! category. The table is built once at startup (either the built-in table or
//! a TOML factor file) and shared read-only for the rest of the process.
//!
//! Factor file format:
//!
//! ```toml
//! [[category]]
//! name = "transport"
//! unit = "km"
//!
//! [category.activities]
//! car_petrol = 0.192
//! bus = 0.105
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Unit label used when a category has no declared unit
pub const FALLBACK_UNIT: &str = "unit";

/// Built-in table: (category, default unit, [(activity, kg CO2 per unit)])
const BUILTIN: &[(&str, &str, &[(&str, f64)])] = &[
    (
        "transport",
        "km",
        &[
            ("car_petrol", 0.192),
            ("car_diesel", 0.171),
            ("bus", 0.105),
            ("train", 0.041),
            ("plane_short", 0.15),
            ("plane_long", 0.09),
            ("motorcycle", 0.103),
            ("electric_car", 0.05),
        ],
    ),
    (
        "electricity",
        "kWh",
        &[("grid", 0.5), ("solar", 0.05), ("wind", 0.011), ("coal", 0.82)],
    ),
    (
        "food",
        "kg",
        &[
            ("beef", 27.0),
            ("chicken", 6.9),
            ("pork", 12.1),
            ("fish", 6.1),
            ("rice", 4.0),
            ("vegetables", 2.0),
            ("milk", 1.9),
            ("cheese", 13.5),
        ],
    ),
    (
        "waste",
        "kg",
        &[
            ("landfill", 0.5),
            ("recycled", 0.1),
            ("composted", 0.3),
            ("plastic", 2.5),
        ],
    ),
];

/// One activity and its emission factor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityFactor {
    pub name: String,
    /// kg CO2 per unit
    pub factor: f64,
}

/// All activities of a category with the category's default unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryFactors {
    pub name: String,
    pub default_unit: String,
    pub activities: Vec<ActivityFactor>,
}

impl CategoryFactors {
    /// Look up an activity (already lower-cased)
    fn factor(&self, activity: &str) -> Option<f64> {
        self.activities
            .iter()
            .find(|a| a.name == activity)
            .map(|a| a.factor)
    }

    /// Activity names in table order
    pub fn activity_names(&self) -> Vec<String> {
        self.activities.iter().map(|a| a.name.clone()).collect()
    }
}

/// Immutable emission factor table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorTable {
    categories: Vec<CategoryFactors>,
}

impl FactorTable {
    /// The canonical built-in table
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, unit, activities)| CategoryFactors {
                name: (*name).to_string(),
                default_unit: (*unit).to_string(),
                activities: activities
                    .iter()
                    .map(|(activity, factor)| ActivityFactor {
                        name: (*activity).to_string(),
                        factor: *factor,
                    })
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    /// Load a table from a TOML factor file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        info!(
            "Loaded {} categories from factor file {}",
            table.categories.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse a table from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FactorFile =
            toml::from_str(content).map_err(|e| Error::InvalidFactorTable(e.to_string()))?;

        if file.category.is_empty() {
            return Err(Error::InvalidFactorTable(
                "at least one category is required".to_string(),
            ));
        }

        let mut categories: Vec<CategoryFactors> = Vec::with_capacity(file.category.len());
        for entry in file.category {
            let name = entry.name.trim().to_lowercase();
            if name.is_empty() {
                return Err(Error::InvalidFactorTable(
                    "category name must not be empty".to_string(),
                ));
            }
            if categories.iter().any(|c| c.name == name) {
                return Err(Error::InvalidFactorTable(format!(
                    "duplicate category '{name}'"
                )));
            }
            if entry.activities.is_empty() {
                return Err(Error::InvalidFactorTable(format!(
                    "category '{name}' has no activities"
                )));
            }

            let mut activities: Vec<ActivityFactor> = Vec::with_capacity(entry.activities.len());
            for (activity, value) in entry.activities {
                let activity = activity.trim().to_lowercase();
                let factor = value
                    .as_float()
                    .or_else(|| value.as_integer().map(|i| i as f64))
                    .filter(|f| f.is_finite())
                    .ok_or_else(|| {
                        Error::InvalidFactorTable(format!(
                            "factor for {name}.{activity} must be a finite number"
                        ))
                    })?;
                if activities.iter().any(|a| a.name == activity) {
                    return Err(Error::InvalidFactorTable(format!(
                        "duplicate activity '{activity}' in '{name}'"
                    )));
                }
                activities.push(ActivityFactor {
                    name: activity,
                    factor,
                });
            }

            categories.push(CategoryFactors {
                name,
                default_unit: entry.unit.unwrap_or_else(|| FALLBACK_UNIT.to_string()),
                activities,
            });
        }

        Ok(Self { categories })
    }

    /// Look up the factor for a (category, activity) pair, case-insensitively
    pub fn lookup(&self, category: &str, activity: &str) -> Result<f64> {
        let category = category.to_lowercase();
        let activity = activity.to_lowercase();

        let entry = self
            .category(&category)
            .ok_or_else(|| Error::UnknownCategory {
                category: category.clone(),
                available: self.category_names(),
            })?;

        entry.factor(&activity).ok_or_else(|| Error::UnknownActivity {
            category: category.clone(),
            activity,
            available: entry.activity_names(),
        })
    }

    /// Find a category by (lower-case) name
    pub fn category(&self, name: &str) -> Option<&CategoryFactors> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All categories in table order
    pub fn categories(&self) -> &[CategoryFactors] {
        &self.categories
    }

    /// Category names in table order
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Default unit label for a category, or `"unit"` if unknown
    pub fn default_unit(&self, category: &str) -> &str {
        self.category(&category.to_lowercase())
            .map(|c| c.default_unit.as_str())
            .unwrap_or(FALLBACK_UNIT)
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// On-disk factor file layout
#[derive(Debug, Deserialize)]
struct FactorFile {
    #[serde(default)]
    category: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    unit: Option<String>,
    #[serde(default)]
    activities: toml::Table,
}
