//! Unit conversion and sentinel masking.
//!
//! Masking must run strictly before conversion: a converted sentinel
//! (-9999.0 * 1.8 + 32 = -17948.2) would masquerade as a finite extreme-cold
//! reading instead of being recognizably absent.

use crate::utils::constants::{FAHRENHEIT_OFFSET, FAHRENHEIT_SCALE};

/// Whether a value is the "no observation" marker.
///
/// NaN is not equal to itself, so callers must use this predicate rather
/// than equality when testing for undefined entries.
pub fn is_undefined(value: f64) -> bool {
    value.is_nan()
}

/// Replace every entry exactly equal to `sentinel` with NaN.
pub fn mask_sentinel(values: &[f64], sentinel: f64) -> Vec<f64> {
    values
        .iter()
        .map(|&v| if v == sentinel { f64::NAN } else { v })
        .collect()
}

/// Convert Celsius values to Fahrenheit; undefined entries propagate.
pub fn celsius_to_fahrenheit(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|&v| v * FAHRENHEIT_SCALE + FAHRENHEIT_OFFSET)
        .collect()
}

/// Mask the sentinel, then convert to Fahrenheit, in that order.
pub fn convert_observations(values: &[f64], sentinel: f64) -> Vec<f64> {
    celsius_to_fahrenheit(&mask_sentinel(values, sentinel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::MISSING_SENTINEL;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mask_sentinel() {
        let masked = mask_sentinel(&[MISSING_SENTINEL, 5.0, 25.0], MISSING_SENTINEL);

        assert_eq!(masked.len(), 3);
        assert!(is_undefined(masked[0]));
        assert_eq!(masked[1], 5.0);
        assert_eq!(masked[2], 25.0);
    }

    #[test]
    fn test_mask_is_exact_equality() {
        // A value near the sentinel is a legitimate (absurd) reading
        let masked = mask_sentinel(&[-9998.999], MISSING_SENTINEL);
        assert!(!is_undefined(masked[0]));
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        let converted = celsius_to_fahrenheit(&[0.0, 100.0, -40.0]);

        assert!((converted[0] - 32.0).abs() < 1e-9);
        assert!((converted[1] - 212.0).abs() < 1e-9);
        assert!((converted[2] - -40.0).abs() < 1e-9);
    }

    #[test]
    fn test_conversion_propagates_undefined() {
        let converted = celsius_to_fahrenheit(&[f64::NAN, 5.0]);

        assert!(is_undefined(converted[0]));
        assert!((converted[1] - 41.0).abs() < 1e-9);
    }

    #[test]
    fn test_mask_before_convert_order() {
        let converted = convert_observations(&[MISSING_SENTINEL, 5.0, 25.0, 75.0], MISSING_SENTINEL);

        assert_eq!(converted.len(), 4);
        // The sentinel never becomes -17948.2
        assert!(is_undefined(converted[0]));
        assert!((converted[1] - 41.0).abs() < 1e-9);
        assert!((converted[2] - 77.0).abs() < 1e-9);
        assert!((converted[3] - 167.0).abs() < 1e-9);
    }
}
