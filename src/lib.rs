// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hincas Validator
//!
//! Validates measured distances between hincas against the expected
//! distances of a configuration, per hinca and in total, within fixed
//! tolerances. Committed validations are kept in a history that can be
//! exported as CSV or as a printable report.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod settings;
pub mod storage;
pub mod store;
pub mod telemetry;
pub mod validation;
pub mod wizard;

pub use config::{Configuration, HincasData, Stage, ToleranceSettings};
pub use error::{AdminError, ImportError, SessionError, StorageError, WizardError};
pub use history::{ExportFilter, HistoryLog, HistoryRecord, HistoryRecordBuilder};
pub use settings::AppSettings;
pub use store::Store;
pub use validation::{is_within_tolerance, TotalValidation, ValidationResult, ValidationSession};
pub use wizard::{Wizard, WizardStep};

/// Start a session for a configuration of the document.
///
/// Returns `None` when the stage or configuration does not exist.
pub fn start_session(data: &HincasData, stage_id: &str, config_id: &str) -> Option<ValidationSession> {
    let stage = data.stage(stage_id)?;
    let config = stage.configuration(config_id)?;
    Some(ValidationSession::new(stage.name.clone(), config.clone(), data.tolerance))
}
