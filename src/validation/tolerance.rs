// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tolerance comparison with fixed 4-decimal rounding

/// Number of decimal places every comparison is rounded to
pub const DECIMALS: u32 = 4;

const SCALE: f64 = 10_u32.pow(DECIMALS) as f64;

/// Round a value to 4 decimal places.
///
/// Absorbs binary representation error so that e.g. `0.1 + 0.2` compares
/// equal to `0.3`.
pub fn round4(value: f64) -> f64 {
    (value * SCALE).round() / SCALE
}

/// Check whether `difference` lies within `tolerance`.
///
/// The absolute difference is rounded to 4 decimals first and the bound is
/// inclusive, so a difference exactly equal to the tolerance passes.
pub fn is_within_tolerance(difference: f64, tolerance: f64) -> bool {
    round4(difference.abs()) <= tolerance
}
