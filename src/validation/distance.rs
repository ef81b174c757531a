// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-hinca distance validation

use super::tolerance::is_within_tolerance;
use super::types::{Measurement, ValidationResult};

/// Validate measured distances against expected ones.
///
/// Unset slots produce no result. Measurements past the end of `expected`
/// are ignored. Output follows expected-index order.
pub fn validate(expected: &[f64], measured: &[Measurement], tolerance: f64) -> Vec<ValidationResult> {
    expected
        .iter()
        .zip(measured.iter())
        .enumerate()
        .filter_map(|(index, (&expected, measured))| {
            measured.map(|measured| {
                let difference = measured - expected;
                ValidationResult {
                    index,
                    expected,
                    measured,
                    difference,
                    is_valid: is_within_tolerance(difference, tolerance),
                }
            })
        })
        .collect()
}
