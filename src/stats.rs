// src/stats.rs

//! Aggregate statistics over stored emission records
//!
//! Totals are accumulated at full precision; only the percentage is rounded
//! here (to 1 decimal). Percentages are rounded independently per category, so
//! they need not add up to exactly 100.

use crate::db::models::EmissionRecord;
use crate::equivalents::{Equivalents, equivalents, round_to};

/// Share of total emissions above which a category earns a recommendation
pub const RECOMMENDATION_THRESHOLD_PCT: f64 = 40.0;

pub const TRANSPORT_RECOMMENDATION: &str =
    "Your transport emissions are high. Consider carpooling or public transport.";
pub const FOOD_RECOMMENDATION: &str = "Consider reducing meat consumption, especially beef.";
pub const ELECTRICITY_RECOMMENDATION: &str =
    "Switch to energy-efficient appliances and LED bulbs.";
pub const BALANCED_RECOMMENDATION: &str = "Your emissions are well balanced across categories!";

/// Sub-total for one activity within a category
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityTotal {
    pub activity: String,
    pub total_kg: f64,
}

/// Per-category aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total_kg: f64,
    pub count: usize,
    /// Activities in first-seen order
    pub activities: Vec<ActivityTotal>,
    /// Share of the overall total, rounded to 1 decimal
    pub percentage: f64,
}

impl CategoryBreakdown {
    fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            total_kg: 0.0,
            count: 0,
            activities: Vec::new(),
            percentage: 0.0,
        }
    }

    fn add(&mut self, activity: &str, co2_kg: f64) {
        self.total_kg += co2_kg;
        self.count += 1;
        match self.activities.iter_mut().find(|a| a.activity == activity) {
            Some(entry) => entry.total_kg += co2_kg,
            None => self.activities.push(ActivityTotal {
                activity: activity.to_string(),
                total_kg: co2_kg,
            }),
        }
    }
}

/// Statistics for a non-empty record set
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_co2_kg: f64,
    pub total_records: usize,
    pub daily_average_kg: f64,
    pub recording_period_days: i64,
    /// Categories in first-seen order
    pub breakdown: Vec<CategoryBreakdown>,
    pub equivalents: Equivalents,
    pub recommendations: Vec<String>,
}

impl Stats {
    /// Breakdown entry for a category, if it has any records
    pub fn category(&self, name: &str) -> Option<&CategoryBreakdown> {
        self.breakdown.iter().find(|b| b.category == name)
    }
}

/// Outcome of aggregating a record set
#[derive(Debug, Clone, PartialEq)]
pub enum StatsOutcome {
    /// No records yet; not an error
    Empty,
    Report(Stats),
}

/// Aggregate a record set into totals, breakdown and recommendations
pub fn statistics(records: &[EmissionRecord]) -> StatsOutcome {
    let (Some(oldest), Some(newest)) = (
        records.iter().map(|r| r.timestamp).min(),
        records.iter().map(|r| r.timestamp).max(),
    ) else {
        return StatsOutcome::Empty;
    };

    let mut total_co2_kg = 0.0;
    let mut breakdown: Vec<CategoryBreakdown> = Vec::new();

    for record in records {
        total_co2_kg += record.co2_kg;

        let index = match breakdown.iter().position(|b| b.category == record.category) {
            Some(index) => index,
            None => {
                breakdown.push(CategoryBreakdown::new(&record.category));
                breakdown.len() - 1
            }
        };
        breakdown[index].add(&record.activity, record.co2_kg);
    }

    for entry in &mut breakdown {
        // A zero total (only zero-amount records) has no meaningful share
        entry.percentage = if total_co2_kg == 0.0 {
            0.0
        } else {
            round_to(entry.total_kg / total_co2_kg * 100.0, 1)
        };
    }

    let recording_period_days = (newest - oldest).num_days().max(1);
    let daily_average_kg = total_co2_kg / recording_period_days as f64;
    let recommendations = recommendations(&breakdown);

    StatsOutcome::Report(Stats {
        total_co2_kg,
        total_records: records.len(),
        daily_average_kg,
        recording_period_days,
        breakdown,
        equivalents: equivalents(total_co2_kg),
        recommendations,
    })
}

/// Canned advice for every category above the threshold, in breakdown order.
///
/// Waste has no message: a waste-heavy footprint yields no advice for that
/// category.
pub fn recommendations(breakdown: &[CategoryBreakdown]) -> Vec<String> {
    let mut recs: Vec<String> = breakdown
        .iter()
        .filter(|b| b.percentage > RECOMMENDATION_THRESHOLD_PCT)
        .filter_map(|b| match b.category.as_str() {
            "transport" => Some(TRANSPORT_RECOMMENDATION),
            "food" => Some(FOOD_RECOMMENDATION),
            "electricity" => Some(ELECTRICITY_RECOMMENDATION),
            _ => None,
        })
        .map(str::to_string)
        .collect();

    if recs.is_empty() {
        recs.push(BALANCED_RECOMMENDATION.to_string());
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn record(id: i64, category: &str, activity: &str, co2_kg: f64, at: DateTime<Utc>) -> EmissionRecord {
        EmissionRecord {
            id,
            category: category.to_string(),
            activity: activity.to_string(),
            amount: 1.0,
            unit: "kg".to_string(),
            co2_kg,
            timestamp: at,
            owner: "demo_user".to_string(),
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
    }

    fn report(records: &[EmissionRecord]) -> Stats {
        match statistics(records) {
            StatsOutcome::Report(stats) => stats,
            StatsOutcome::Empty => panic!("expected a report"),
        }
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(statistics(&[]), StatsOutcome::Empty);
    }

    #[test]
    fn test_three_category_example() {
        let t = base_time();
        let records = vec![
            record(1, "transport", "car_petrol", 19.2, t),
            record(2, "food", "beef", 270.0, t),
            record(3, "electricity", "grid", 5.0, t),
        ];
        let stats = report(&records);

        assert_relative_eq!(stats.total_co2_kg, 294.2, max_relative = 1e-12);
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.category("transport").unwrap().percentage, 6.5);
        assert_eq!(stats.category("food").unwrap().percentage, 91.8);
        assert_eq!(stats.category("electricity").unwrap().percentage, 1.7);
        assert_eq!(stats.recommendations, vec![FOOD_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_breakdown_keeps_first_seen_order() {
        let t = base_time();
        let records = vec![
            record(1, "waste", "landfill", 1.0, t),
            record(2, "food", "rice", 4.0, t),
            record(3, "waste", "plastic", 2.5, t),
            record(4, "food", "rice", 4.0, t),
            record(5, "transport", "bus", 2.0, t),
        ];
        let stats = report(&records);

        let order: Vec<&str> = stats.breakdown.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(order, vec!["waste", "food", "transport"]);

        let waste = stats.category("waste").unwrap();
        assert_eq!(waste.count, 2);
        assert_relative_eq!(waste.total_kg, 3.5);
        assert_eq!(waste.activities.len(), 2);
        assert_eq!(waste.activities[0].activity, "landfill");

        let food = stats.category("food").unwrap();
        assert_eq!(food.activities.len(), 1);
        assert_relative_eq!(food.activities[0].total_kg, 8.0);
    }

    #[test]
    fn test_percentages_may_not_sum_to_100() {
        let t = base_time();
        let records = vec![
            record(1, "transport", "bus", 1.0, t),
            record(2, "food", "rice", 1.0, t),
            record(3, "waste", "landfill", 1.0, t),
        ];
        let stats = report(&records);
        let sum: f64 = stats.breakdown.iter().map(|b| b.percentage).sum();
        assert_relative_eq!(sum, 99.9, max_relative = 1e-9);
    }

    #[test]
    fn test_daily_average_same_day_divides_by_one() {
        let t = base_time();
        let records = vec![
            record(1, "food", "beef", 27.0, t),
            record(2, "food", "beef", 27.0, t + Duration::hours(20)),
        ];
        let stats = report(&records);
        assert_eq!(stats.recording_period_days, 1);
        assert_relative_eq!(stats.daily_average_kg, 54.0);
    }

    #[test]
    fn test_daily_average_over_several_days() {
        let t = base_time();
        let records = vec![
            record(1, "electricity", "grid", 10.0, t),
            record(2, "electricity", "grid", 20.0, t + Duration::days(3) + Duration::hours(5)),
        ];
        let stats = report(&records);
        assert_eq!(stats.recording_period_days, 3);
        assert_relative_eq!(stats.daily_average_kg, 10.0);
    }

    #[test]
    fn test_balanced_recommendation() {
        let t = base_time();
        let records = vec![
            record(1, "transport", "bus", 35.0, t),
            record(2, "food", "rice", 35.0, t),
            record(3, "electricity", "grid", 30.0, t),
        ];
        let stats = report(&records);
        assert_eq!(stats.recommendations, vec![BALANCED_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_waste_has_no_recommendation() {
        let t = base_time();
        let records = vec![
            record(1, "waste", "plastic", 90.0, t),
            record(2, "food", "rice", 10.0, t),
        ];
        let stats = report(&records);
        assert_eq!(stats.category("waste").unwrap().percentage, 90.0);
        assert_eq!(stats.recommendations, vec![BALANCED_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_multiple_recommendations_follow_breakdown_order() {
        let t = base_time();
        let records = vec![
            record(1, "electricity", "coal", 45.0, t),
            record(2, "transport", "car_petrol", 45.0, t),
            record(3, "food", "rice", 10.0, t),
        ];
        let stats = report(&records);
        assert_eq!(
            stats.recommendations,
            vec![
                ELECTRICITY_RECOMMENDATION.to_string(),
                TRANSPORT_RECOMMENDATION.to_string()
            ]
        );
    }

    #[test]
    fn test_exactly_forty_percent_is_not_high() {
        let t = base_time();
        let records = vec![
            record(1, "transport", "bus", 40.0, t),
            record(2, "food", "rice", 30.0, t),
            record(3, "electricity", "grid", 30.0, t),
        ];
        let stats = report(&records);
        assert_eq!(stats.recommendations, vec![BALANCED_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_zero_total_has_zero_percentages() {
        let t = base_time();
        let records = vec![record(1, "food", "beef", 0.0, t)];
        let stats = report(&records);
        assert_eq!(stats.category("food").unwrap().percentage, 0.0);
        assert_eq!(stats.daily_average_kg, 0.0);
        assert_eq!(stats.recommendations, vec![BALANCED_RECOMMENDATION.to_string()]);
    }
}
