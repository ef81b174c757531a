// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tolerance validation engine

pub mod aggregate;
pub mod distance;
pub mod session;
pub mod tolerance;
pub mod types;

pub use aggregate::{measured_total, validate_total};
pub use distance::validate;
pub use session::{parse_measurement, ValidationSession};
pub use tolerance::{is_within_tolerance, round4};
pub use types::{verdict, Measurement, SessionState, TotalValidation, ValidationResult};
