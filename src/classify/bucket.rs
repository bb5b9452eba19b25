//! Threshold bucketing: one filtered copy of the measurement array per
//! schedule level, with out-of-bin entries set to NaN.

use crate::classify::convert::is_undefined;
use crate::models::{Rgb, ThresholdSchedule};

/// How the first (minimum) level's bin is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BottomBinPolicy {
    /// Retain `value < levels[0]`, reproducing the reference behavior.
    /// The band `[levels[0], levels[1])` is left unclassified and
    /// below-minimum values land in the bottom bin.
    #[default]
    Literal,
    /// Retain `levels[0] <= value < levels[1]`, treating the first level
    /// like an interior one. Below-minimum values are excluded entirely.
    Corrected,
}

/// One classified layer: a filtered copy of the source array (same length,
/// out-of-bin entries undefined) paired with its level and marker color.
#[derive(Debug, Clone)]
pub struct BinLayer {
    pub level: f64,
    pub color: Rgb,
    pub values: Vec<f64>,
}

impl BinLayer {
    /// Number of defined entries in this bin.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|&&v| !is_undefined(v)).count()
    }
}

/// Partition converted, sentinel-masked values into one `BinLayer` per
/// schedule level.
///
/// The last level keeps `value >= levels[N-1]` (unbounded top bin), interior
/// level `i` keeps `levels[i] <= value < levels[i+1]`, and the first level
/// follows `policy`. Undefined input entries stay undefined in every bin.
/// Each layer's array is an independent copy; the source is never mutated.
pub fn bucket_by_thresholds(
    values: &[f64],
    schedule: &ThresholdSchedule,
    policy: BottomBinPolicy,
) -> Vec<BinLayer> {
    let levels = schedule.levels();
    let colors = schedule.colors();
    let last = levels.len() - 1;

    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| {
            let in_bin: Box<dyn Fn(f64) -> bool> = if i == last {
                Box::new(move |v| v >= level)
            } else if i == 0 {
                let next = levels[1];
                match policy {
                    BottomBinPolicy::Literal => Box::new(move |v| v < level),
                    BottomBinPolicy::Corrected => Box::new(move |v| v >= level && v < next),
                }
            } else {
                let next = levels[i + 1];
                Box::new(move |v| v >= level && v < next)
            };

            let filtered = values
                .iter()
                .map(|&v| {
                    // NaN fails every comparison, so undefined entries are
                    // excluded without a special case
                    if !is_undefined(v) && in_bin(v) {
                        v
                    } else {
                        f64::NAN
                    }
                })
                .collect();

            BinLayer {
                level,
                color: colors[i],
                values: filtered,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::convert::convert_observations;
    use crate::utils::constants::MISSING_SENTINEL;

    fn schedule() -> ThresholdSchedule {
        let levels = vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0];
        let colors = (0..8).map(|i| Rgb::new(i as u8, 0, 0)).collect();
        ThresholdSchedule::new(levels, colors).unwrap()
    }

    fn defined(layer: &BinLayer) -> Vec<f64> {
        layer.values.iter().copied().filter(|v| !is_undefined(*v)).collect()
    }

    #[test]
    fn test_layers_preserve_length() {
        let values = [f64::NAN, 41.0, 77.0, 167.0];
        let layers = bucket_by_thresholds(&values, &schedule(), BottomBinPolicy::Literal);

        assert_eq!(layers.len(), 8);
        for layer in &layers {
            assert_eq!(layer.values.len(), values.len());
        }
    }

    #[test]
    fn test_undefined_excluded_from_every_bin() {
        let values = [f64::NAN, 41.0];
        let layers = bucket_by_thresholds(&values, &schedule(), BottomBinPolicy::Literal);

        for layer in &layers {
            assert!(is_undefined(layer.values[0]));
        }
    }

    #[test]
    fn test_top_bin_unbounded() {
        let values = [69.9, 70.0, 167.0];
        let layers = bucket_by_thresholds(&values, &schedule(), BottomBinPolicy::Literal);

        let top = layers.last().unwrap();
        assert!(is_undefined(top.values[0]));
        assert_eq!(defined(top), vec![70.0, 167.0]);

        // ...and defined nowhere else
        for layer in &layers[..7] {
            assert!(is_undefined(layer.values[1]));
            assert!(is_undefined(layer.values[2]));
        }
    }

    #[test]
    fn test_interior_bins_mutually_exclusive() {
        let values = [10.0, 15.0, 19.9, 20.0, 69.9];
        let layers = bucket_by_thresholds(&values, &schedule(), BottomBinPolicy::Literal);

        for index in 0..values.len() {
            let homes: Vec<f64> = layers
                .iter()
                .filter(|l| !is_undefined(l.values[index]))
                .map(|l| l.level)
                .collect();
            assert_eq!(homes.len(), 1, "value {} in bins {:?}", values[index], homes);
        }

        assert_eq!(defined(&layers[1]), vec![10.0, 15.0, 19.9]);
        assert_eq!(defined(&layers[2]), vec![20.0]);
        assert_eq!(defined(&layers[6]), vec![69.9]);
    }

    #[test]
    fn test_bottom_bin_literal_policy() {
        let values = [-5.0, 0.0, 5.0, 10.0];
        let layers = bucket_by_thresholds(&values, &schedule(), BottomBinPolicy::Literal);
        let bottom = &layers[0];

        // Only below-minimum values land in the bottom bin; the boundary
        // value itself is excluded
        assert_eq!(defined(bottom), vec![-5.0]);
        assert!(is_undefined(bottom.values[1]));

        // The band [0, 10) is unclassified under the literal policy
        let homes_of_5: Vec<f64> = layers
            .iter()
            .filter(|l| !is_undefined(l.values[2]))
            .map(|l| l.level)
            .collect();
        assert!(homes_of_5.is_empty());
    }

    #[test]
    fn test_bottom_bin_corrected_policy() {
        let values = [-5.0, 0.0, 5.0, 10.0];
        let layers = bucket_by_thresholds(&values, &schedule(), BottomBinPolicy::Corrected);
        let bottom = &layers[0];

        // [0, 10) lands in the bottom bin; below-minimum is excluded entirely
        assert_eq!(defined(bottom), vec![0.0, 5.0]);
        let homes_of_neg5: Vec<f64> = layers
            .iter()
            .filter(|l| !is_undefined(l.values[0]))
            .map(|l| l.level)
            .collect();
        assert!(homes_of_neg5.is_empty());
    }

    #[test]
    fn test_spec_scenario_in_converted_units() {
        // Membership is computed post-conversion: 25 C becomes 77 F and
        // falls in the [70, inf) bin, not [20, 30)
        let raw = [MISSING_SENTINEL, 5.0, 25.0, 75.0];
        let converted = convert_observations(&raw, MISSING_SENTINEL);
        let layers = bucket_by_thresholds(&converted, &schedule(), BottomBinPolicy::Literal);

        let top = layers.last().unwrap();
        assert!(is_undefined(top.values[0]));
        assert!(is_undefined(top.values[1]));
        assert_eq!(defined(top), vec![77.0, 167.0]);

        // 41 F lives in the [40, 50) bin
        assert_eq!(defined(&layers[4]), vec![41.0]);

        // The sentinel row is undefined in all 8 bins
        for layer in &layers {
            assert!(is_undefined(layer.values[0]));
        }
    }
}
