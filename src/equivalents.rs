// src/equivalents.rs

//! Human-relatable equivalents of a CO2 mass

use serde::Serialize;

/// kg CO2 absorbed by one tree in a year
pub const KG_PER_TREE_YEAR: f64 = 21.77;
/// kg CO2 per km driven in an average petrol car
pub const KG_PER_CAR_KM: f64 = 0.192;
/// kg CO2 per full smartphone charge
pub const KG_PER_SMARTPHONE_CHARGE: f64 = 0.008;
/// kg CO2 per hour of television
pub const KG_PER_TV_HOUR: f64 = 0.088;

/// Round to a fixed number of decimal places (half away from zero)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// A CO2 mass expressed in everyday quantities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equivalents {
    pub trees_needed: f64,
    pub km_by_car: f64,
    pub smartphones_charged: f64,
    pub hours_of_tv: f64,
}

/// Convert a CO2 mass (kg) into equivalents.
///
/// Zero and negative masses are not special-cased.
pub fn equivalents(co2_kg: f64) -> Equivalents {
    Equivalents {
        trees_needed: round_to(co2_kg / KG_PER_TREE_YEAR, 1),
        km_by_car: round_to(co2_kg / KG_PER_CAR_KM, 1),
        smartphones_charged: round_to(co2_kg / KG_PER_SMARTPHONE_CHARGE, 0),
        hours_of_tv: round_to(co2_kg / KG_PER_TV_HOUR, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_mass() {
        let eq = equivalents(0.0);
        assert_eq!(eq.trees_needed, 0.0);
        assert_eq!(eq.km_by_car, 0.0);
        assert_eq!(eq.smartphones_charged, 0.0);
        assert_eq!(eq.hours_of_tv, 0.0);
    }

    #[test]
    fn test_known_values() {
        let eq = equivalents(19.2);
        assert_abs_diff_eq!(eq.km_by_car, 100.0);
        assert_abs_diff_eq!(eq.trees_needed, 0.9);
        assert_abs_diff_eq!(eq.smartphones_charged, 2400.0);
        assert_abs_diff_eq!(eq.hours_of_tv, 218.2);
    }

    #[test]
    fn test_linear_in_input() {
        let x = 147.3;
        let single = equivalents(x);
        let double = equivalents(2.0 * x);
        // Each field rounds independently
        assert_abs_diff_eq!(double.trees_needed, 2.0 * single.trees_needed, epsilon = 0.2);
        assert_abs_diff_eq!(double.km_by_car, 2.0 * single.km_by_car, epsilon = 0.2);
        assert_abs_diff_eq!(
            double.smartphones_charged,
            2.0 * single.smartphones_charged,
            epsilon = 2.0
        );
        assert_abs_diff_eq!(double.hours_of_tv, 2.0 * single.hours_of_tv, epsilon = 0.2);
    }

    #[test]
    fn test_negative_mass_is_not_guarded() {
        let eq = equivalents(-19.2);
        assert_abs_diff_eq!(eq.km_by_car, -100.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(6.5261, 1), 6.5);
        assert_eq!(round_to(91.7743, 1), 91.8);
        assert_eq!(round_to(294.2, 2), 294.2);
        assert_eq!(round_to(2399.6, 0), 2400.0);
    }
}
