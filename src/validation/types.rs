// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Validation result types

use serde::{Deserialize, Serialize};

/// A single measurement slot; `None` means the slot has not been entered
pub type Measurement = Option<f64>;

/// Per-hinca validation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// 0-based slot position
    pub index: usize,
    pub expected: f64,
    pub measured: f64,
    /// `measured - expected`, signed and unrounded
    pub difference: f64,
    pub is_valid: bool,
}

/// Aggregate validation of the measured total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalValidation {
    pub expected: f64,
    /// Sum of all measurements, rounded to 4 decimals
    pub measured: f64,
    pub difference: f64,
    pub is_valid: bool,
}

/// Fill state of a validation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Empty,
    Partial,
    Complete,
}

impl SessionState {
    /// Derive the state from the number of filled slots
    pub fn from_counts(filled: usize, len: usize) -> Self {
        if filled == 0 {
            SessionState::Empty
        } else if filled < len {
            SessionState::Partial
        } else {
            SessionState::Complete
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::Partial => "partial",
            SessionState::Complete => "complete",
        }
    }
}

/// Overall verdict over a set of per-hinca results and the total check.
///
/// An empty result set is never valid.
pub fn verdict(results: &[ValidationResult], total: Option<&TotalValidation>) -> bool {
    match total {
        Some(total) if !results.is_empty() => {
            results.iter().all(|r| r.is_valid) && total.is_valid
        }
        _ => false,
    }
}
