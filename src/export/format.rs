// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Number formatting shared by every output

use crate::validation::tolerance::DECIMALS;
use crate::validation::ValidationResult;

const PRECISION: usize = DECIMALS as usize;

/// Format a distance with 4 decimals
pub fn distance(value: f64) -> String {
    format!("{:.*}", PRECISION, value)
}

/// Format a difference with 4 decimals and an explicit `+` when non-negative
pub fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.*}", PRECISION, value)
    } else {
        format!("{:.*}", PRECISION, value)
    }
}

/// `expected→measured|difference`
pub fn slot_cell(result: &ValidationResult) -> String {
    format!(
        "{}→{}|{}",
        distance(result.expected),
        distance(result.measured),
        signed(result.difference)
    )
}

pub fn verdict_label(valid: bool) -> &'static str {
    if valid {
        "VALID"
    } else {
        "INVALID"
    }
}
