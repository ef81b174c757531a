// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Validation session: one configuration, one in-progress measurement set

use tracing::debug;

use super::aggregate;
use super::distance;
use super::types::{verdict, Measurement, SessionState, TotalValidation, ValidationResult};
use crate::config::{Configuration, ToleranceSettings};
use crate::error::SessionError;
use crate::history::{HistoryRecord, HistoryRecordBuilder};

/// Parse a measurement as typed by a user.
///
/// Empty or non-numeric input is treated as unset. A comma is accepted as
/// decimal separator.
pub fn parse_measurement(input: &str) -> Measurement {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replacen(',', ".", 1)
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validation of one measurement run against one configuration
#[derive(Debug, Clone)]
pub struct ValidationSession {
    stage_name: String,
    configuration: Configuration,
    tolerance: ToleranceSettings,
    measurements: Vec<Measurement>,
    description: Option<String>,
    results: Vec<ValidationResult>,
    total: Option<TotalValidation>,
}

impl ValidationSession {
    /// Start an empty session for a configuration
    pub fn new(
        stage_name: impl Into<String>,
        configuration: Configuration,
        tolerance: ToleranceSettings,
    ) -> Self {
        let measurements = vec![None; configuration.len()];
        Self {
            stage_name: stage_name.into(),
            configuration,
            tolerance,
            measurements,
            description: None,
            results: Vec::new(),
            total: None,
        }
    }

    /// Replace one measurement slot and recompute every derived value
    pub fn set_measurement(&mut self, index: usize, value: Measurement) -> Result<(), SessionError> {
        let len = self.measurements.len();
        let slot = self
            .measurements
            .get_mut(index)
            .ok_or(SessionError::SlotOutOfRange { index, len })?;
        *slot = value.filter(|v| v.is_finite());
        self.recompute();
        Ok(())
    }

    /// Replace one measurement slot from raw user input
    pub fn set_measurement_input(&mut self, index: usize, input: &str) -> Result<(), SessionError> {
        self.set_measurement(index, parse_measurement(input))
    }

    /// Switch to another configuration, discarding all measurements
    pub fn change_configuration(&mut self, stage_name: impl Into<String>, configuration: Configuration) {
        debug!(configuration = %configuration.id, "changing configuration");
        self.stage_name = stage_name.into();
        self.measurements = vec![None; configuration.len()];
        self.configuration = configuration;
        self.recompute();
    }

    /// Clear measurements and description
    pub fn reset(&mut self) {
        self.measurements.iter_mut().for_each(|m| *m = None);
        self.description = None;
        self.recompute();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.filter(|d| !d.trim().is_empty());
    }

    /// Freeze the session into a history record and reset it.
    ///
    /// Only allowed once every slot is measured.
    pub fn commit(
        &mut self,
        builder: &mut HistoryRecordBuilder,
        description: Option<String>,
    ) -> Result<HistoryRecord, SessionError> {
        if description.is_some() {
            self.set_description(description);
        }
        let record = builder.build(self, self.description.clone())?;
        self.reset();
        Ok(record)
    }

    fn recompute(&mut self) {
        self.results = distance::validate(
            &self.configuration.expected_distances,
            &self.measurements,
            self.tolerance.individual,
        );
        self.total = aggregate::validate_total(
            &self.measurements,
            self.configuration.expected_total,
            self.tolerance.total,
        );
        debug!(
            configuration = %self.configuration.id,
            filled = self.filled_count(),
            results = self.results.len(),
            total = ?self.total.map(|t| t.measured),
            "recomputed validation"
        );
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_counts(self.filled_count(), self.measurements.len())
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    /// Number of slots with a value
    pub fn filled_count(&self) -> usize {
        self.measurements.iter().filter(|m| m.is_some()).count()
    }

    /// Indices that still need a measurement
    pub fn outstanding(&self) -> Vec<usize> {
        self.measurements
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Overall verdict; never true for an empty result set
    pub fn all_valid(&self) -> bool {
        verdict(&self.results, self.total.as_ref())
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn result_for(&self, index: usize) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.index == index)
    }

    pub fn total_validation(&self) -> Option<&TotalValidation> {
        self.total.as_ref()
    }

    /// Rounded total of the measurements, if complete
    pub fn measured_total(&self) -> Option<f64> {
        self.total.map(|t| t.measured)
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn tolerance(&self) -> ToleranceSettings {
        self.tolerance
    }

    pub fn stage_name(&self) -> &str {
        &self.stage_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
