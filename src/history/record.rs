// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Immutable history records and their builder

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SessionError;
use crate::validation::{verdict, TotalValidation, ValidationResult, ValidationSession};

/// Display format of record timestamps
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A committed validation, frozen for audit and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "stage")]
    pub stage_name: String,
    #[serde(rename = "configuration")]
    pub configuration_id: String,
    pub measurements: Vec<f64>,
    pub total: f64,
    pub results: Vec<ValidationResult>,
    pub total_validation: TotalValidation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HistoryRecord {
    /// Overall verdict of the record
    pub fn is_valid(&self) -> bool {
        verdict(&self.results, Some(&self.total_validation))
    }

    /// Result for a given slot, if one was recorded
    pub fn result_for(&self, index: usize) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.index == index)
    }
}

/// Builds [`HistoryRecord`]s from complete sessions.
///
/// Ids are epoch milliseconds, bumped when needed so every id issued by one
/// builder is unique.
#[derive(Debug, Clone)]
pub struct HistoryRecordBuilder {
    timestamp_format: String,
    last_id: i64,
}

impl Default for HistoryRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRecordBuilder {
    pub fn new() -> Self {
        Self::with_timestamp_format(DEFAULT_TIMESTAMP_FORMAT)
    }

    pub fn with_timestamp_format(format: impl Into<String>) -> Self {
        Self {
            timestamp_format: format.into(),
            last_id: 0,
        }
    }

    /// Seed the id counter so new ids never collide with existing ones
    pub fn after_existing<'a>(mut self, records: impl IntoIterator<Item = &'a HistoryRecord>) -> Self {
        self.last_id = records
            .into_iter()
            .filter_map(|r| r.id.parse::<i64>().ok())
            .fold(self.last_id, i64::max);
        self
    }

    /// Build a record stamped with the current local time
    pub fn build(
        &mut self,
        session: &ValidationSession,
        description: Option<String>,
    ) -> Result<HistoryRecord, SessionError> {
        self.build_at(session, description, Local::now())
    }

    /// Build a record stamped with `now`
    pub fn build_at(
        &mut self,
        session: &ValidationSession,
        description: Option<String>,
        now: DateTime<Local>,
    ) -> Result<HistoryRecord, SessionError> {
        let len = session.measurements().len();
        let incomplete = SessionError::Incomplete {
            filled: session.filled_count(),
            len,
        };

        let measurements = session
            .measurements()
            .iter()
            .copied()
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| incomplete.clone())?;
        let total_validation = *session.total_validation().ok_or_else(|| incomplete.clone())?;
        if session.results().is_empty() {
            return Err(incomplete);
        }

        let id = self.next_id(now.timestamp_millis());
        let record = HistoryRecord {
            id: id.to_string(),
            timestamp: now.format(&self.timestamp_format).to_string(),
            stage_name: session.stage_name().to_string(),
            configuration_id: session.configuration().id.clone(),
            measurements,
            total: total_validation.measured,
            results: session.results().to_vec(),
            total_validation,
            description: description.filter(|d| !d.trim().is_empty()),
        };

        info!(
            id = %record.id,
            configuration = %record.configuration_id,
            valid = record.is_valid(),
            "built history record"
        );
        Ok(record)
    }

    fn next_id(&mut self, millis: i64) -> i64 {
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}
