// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Aggregate (total distance) validation

use super::tolerance::{is_within_tolerance, round4};
use super::types::{Measurement, TotalValidation};

/// Sum of the measurements rounded to 4 decimals, if every slot is set
pub fn measured_total(measured: &[Measurement]) -> Option<f64> {
    if measured.is_empty() {
        return None;
    }
    measured
        .iter()
        .copied()
        .sum::<Option<f64>>()
        .map(round4)
}

/// Validate the measured total against the configuration's expected total.
///
/// Returns `None` unless every slot is set: a partial sum says nothing
/// about the full run.
pub fn validate_total(
    measured: &[Measurement],
    expected_total: f64,
    tolerance: f64,
) -> Option<TotalValidation> {
    let total = measured_total(measured)?;
    let difference = total - expected_total;
    Some(TotalValidation {
        expected: expected_total,
        measured: total,
        difference,
        is_valid: is_within_tolerance(difference, tolerance),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_set_has_no_total() {
        assert!(validate_total(&[Some(1.0), None], 3.0, 0.04).is_none());
        assert!(validate_total(&[], 0.0, 0.04).is_none());
    }

    #[test]
    fn test_sum_is_rounded() {
        let total = validate_total(&[Some(0.1), Some(0.2)], 0.3, 0.0).unwrap();
        assert_eq!(total.measured, 0.3);
        assert_eq!(total.difference, 0.0);
        assert!(total.is_valid);
    }

    #[test]
    fn test_out_of_tolerance_total() {
        let total = validate_total(&[Some(1.05), Some(2.0)], 3.0, 0.04).unwrap();
        assert!(!total.is_valid);
    }
}
