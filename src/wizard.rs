// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Guided entry: stage, configuration, one hinca at a time, review

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WizardError;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    SelectStage,
    SelectConfiguration,
    EnterMeasurements,
    Review,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::SelectStage => "select-stage",
            WizardStep::SelectConfiguration => "select-configuration",
            WizardStep::EnterMeasurements => "enter-measurements",
            WizardStep::Review => "review",
        }
    }

    /// 1-based position, for progress display
    pub fn number(&self) -> usize {
        match self {
            WizardStep::SelectStage => 1,
            WizardStep::SelectConfiguration => 2,
            WizardStep::EnterMeasurements => 3,
            WizardStep::Review => 4,
        }
    }
}

/// Navigation state of the guided entry.
///
/// Holds selections and the current hinca only; measurements live in the
/// [`crate::validation::ValidationSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    step: WizardStep,
    stage_id: Option<String>,
    configuration_id: Option<String>,
    slot_count: usize,
    current_slot: usize,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectStage,
            stage_id: None,
            configuration_id: None,
            slot_count: 0,
            current_slot: 0,
        }
    }

    fn require(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                action,
                step: self.step.as_str(),
            })
        }
    }

    fn go(&mut self, step: WizardStep) {
        debug!(from = self.step.as_str(), to = step.as_str(), "wizard step");
        self.step = step;
    }

    pub fn select_stage(&mut self, stage_id: impl Into<String>) -> Result<(), WizardError> {
        self.require(WizardStep::SelectStage, "select a stage")?;
        self.stage_id = Some(stage_id.into());
        self.configuration_id = None;
        self.go(WizardStep::SelectConfiguration);
        Ok(())
    }

    pub fn select_configuration(
        &mut self,
        configuration_id: impl Into<String>,
        slot_count: usize,
    ) -> Result<(), WizardError> {
        self.require(WizardStep::SelectConfiguration, "select a configuration")?;
        if slot_count == 0 {
            return Err(WizardError::NoSlots);
        }
        self.configuration_id = Some(configuration_id.into());
        self.slot_count = slot_count;
        self.current_slot = 0;
        self.go(WizardStep::EnterMeasurements);
        Ok(())
    }

    /// Move to the next hinca, or to review after the last one
    pub fn next_slot(&mut self) -> Result<(), WizardError> {
        self.require(WizardStep::EnterMeasurements, "advance")?;
        if self.current_slot + 1 < self.slot_count {
            self.current_slot += 1;
        } else {
            self.go(WizardStep::Review);
        }
        Ok(())
    }

    pub fn prev_slot(&mut self) -> Result<(), WizardError> {
        self.require(WizardStep::EnterMeasurements, "go back a hinca")?;
        self.current_slot = self.current_slot.saturating_sub(1);
        Ok(())
    }

    /// Return to the previous step, clearing what that step selected
    pub fn back(&mut self) {
        match self.step {
            WizardStep::SelectStage => {}
            WizardStep::SelectConfiguration => {
                self.stage_id = None;
                self.go(WizardStep::SelectStage);
            }
            WizardStep::EnterMeasurements => {
                self.configuration_id = None;
                self.slot_count = 0;
                self.current_slot = 0;
                self.go(WizardStep::SelectConfiguration);
            }
            WizardStep::Review => {
                self.current_slot = self.slot_count.saturating_sub(1);
                self.go(WizardStep::EnterMeasurements);
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn stage_id(&self) -> Option<&str> {
        self.stage_id.as_deref()
    }

    pub fn configuration_id(&self) -> Option<&str> {
        self.configuration_id.as_deref()
    }

    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Entry progress as a percentage of hincas reached
    pub fn progress(&self) -> u8 {
        match self.step {
            WizardStep::Review => 100,
            WizardStep::EnterMeasurements if self.slot_count > 0 => {
                (((self.current_slot + 1) * 100) / self.slot_count) as u8
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_walk() {
        let mut w = Wizard::new();
        w.select_stage("162M").unwrap();
        assert_eq!(w.step(), WizardStep::SelectConfiguration);
        w.select_configuration("2R_EXT_162", 2).unwrap();
        assert_eq!(w.step(), WizardStep::EnterMeasurements);
        assert_eq!(w.progress(), 50);
        w.next_slot().unwrap();
        assert_eq!(w.current_slot(), 1);
        w.next_slot().unwrap();
        assert_eq!(w.step(), WizardStep::Review);
        assert_eq!(w.progress(), 100);
        w.reset();
        assert_eq!(w, Wizard::new());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut w = Wizard::new();
        assert!(w.next_slot().is_err());
        assert!(w.select_configuration("x", 3).is_err());
        w.select_stage("S").unwrap();
        assert!(w.select_stage("S").is_err());
        assert_eq!(w.select_configuration("x", 0), Err(WizardError::NoSlots));
    }

    #[test]
    fn test_prev_slot_stops_at_zero() {
        let mut w = Wizard::new();
        w.select_stage("S").unwrap();
        w.select_configuration("C", 3).unwrap();
        w.prev_slot().unwrap();
        assert_eq!(w.current_slot(), 0);
    }

    #[test]
    fn test_back_clears_selection() {
        let mut w = Wizard::new();
        w.select_stage("S").unwrap();
        w.select_configuration("C", 3).unwrap();
        w.back();
        assert_eq!(w.step(), WizardStep::SelectConfiguration);
        assert!(w.configuration_id().is_none());
        w.back();
        assert_eq!(w.step(), WizardStep::SelectStage);
        assert!(w.stage_id().is_none());
    }

    #[test]
    fn test_back_from_review_returns_to_last_slot() {
        let mut w = Wizard::new();
        w.select_stage("S").unwrap();
        w.select_configuration("C", 2).unwrap();
        w.next_slot().unwrap();
        w.next_slot().unwrap();
        w.back();
        assert_eq!(w.step(), WizardStep::EnterMeasurements);
        assert_eq!(w.current_slot(), 1);
    }
}
