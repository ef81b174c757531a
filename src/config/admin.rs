// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Validated edits of the configuration document

use chrono::Utc;
use rand::Rng;
use tracing::info;

use super::model::{Configuration, HincasData, Stage};
use crate::error::AdminError;
use crate::validation::round4;

/// Largest distance accepted for a single hinca, in metres
pub const MAX_DISTANCE: f64 = 100.0;

/// Longest accepted configuration name
pub const MAX_NAME_LEN: usize = 50;

/// Number of hincas of a freshly added configuration
pub const NEW_CONFIGURATION_SLOTS: usize = 11;

/// Which tolerance to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceKind {
    Individual,
    Total,
}

impl ToleranceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToleranceKind::Individual => "individual",
            ToleranceKind::Total => "total",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "individual" => Some(ToleranceKind::Individual),
            "total" => Some(ToleranceKind::Total),
            _ => None,
        }
    }
}

/// Check a hex colour of the form `#RRGGBB`
pub fn is_valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn random_color() -> String {
    format!("#{:06x}", rand::thread_rng().gen_range(0..=0xFF_FFFFu32))
}

impl HincasData {
    fn stage_for_edit(&mut self, stage_id: &str) -> Result<&mut Stage, AdminError> {
        self.stage_mut(stage_id)
            .ok_or_else(|| AdminError::StageNotFound(stage_id.to_string()))
    }

    fn configuration_for_edit(
        &mut self,
        stage_id: &str,
        config_id: &str,
    ) -> Result<&mut Configuration, AdminError> {
        self.stage_for_edit(stage_id)?
            .configuration_mut(config_id)
            .ok_or_else(|| AdminError::ConfigurationNotFound(config_id.to_string()))
    }

    /// Set one expected distance and recompute the configuration total
    pub fn update_distance(
        &mut self,
        stage_id: &str,
        config_id: &str,
        index: usize,
        value: f64,
    ) -> Result<(), AdminError> {
        let rounded = round4(value);
        if !rounded.is_finite() || rounded <= 0.0 || rounded > MAX_DISTANCE {
            return Err(AdminError::InvalidDistance {
                value,
                max: MAX_DISTANCE,
            });
        }
        let config = self.configuration_for_edit(stage_id, config_id)?;
        let len = config.len();
        let slot = config
            .expected_distances
            .get_mut(index)
            .ok_or(AdminError::IndexOutOfRange { index, len })?;
        *slot = rounded;
        config.expected_total = round4(config.expected_distances.iter().sum());
        info!(
            stage = stage_id,
            configuration = config_id,
            index,
            total = config.expected_total,
            "updated distance"
        );
        Ok(())
    }

    /// Append a blank configuration to a stage and return its id
    pub fn add_configuration(&mut self, stage_id: &str) -> Result<String, AdminError> {
        let stage = self.stage_for_edit(stage_id)?;
        let id = format!("{}_NEW_{}", stage_id, Utc::now().timestamp_millis());
        let configuration = Configuration {
            id: id.clone(),
            name: format!("New configuration {}", stage.configurations.len() + 1),
            color: random_color(),
            expected_distances: vec![0.0; NEW_CONFIGURATION_SLOTS],
            expected_total: 0.0,
        };
        stage.configurations.push(configuration);
        info!(stage = stage_id, configuration = %id, "added configuration");
        Ok(id)
    }

    pub fn delete_configuration(&mut self, stage_id: &str, config_id: &str) -> Result<(), AdminError> {
        let stage = self.stage_for_edit(stage_id)?;
        let before = stage.configurations.len();
        stage.configurations.retain(|c| c.id != config_id);
        if stage.configurations.len() == before {
            return Err(AdminError::ConfigurationNotFound(config_id.to_string()));
        }
        info!(stage = stage_id, configuration = config_id, "deleted configuration");
        Ok(())
    }

    pub fn rename_configuration(
        &mut self,
        stage_id: &str,
        config_id: &str,
        name: &str,
    ) -> Result<(), AdminError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AdminError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AdminError::NameTooLong { max: MAX_NAME_LEN });
        }
        self.configuration_for_edit(stage_id, config_id)?.name = name.to_string();
        Ok(())
    }

    pub fn set_color(&mut self, stage_id: &str, config_id: &str, color: &str) -> Result<(), AdminError> {
        if !is_valid_color(color) {
            return Err(AdminError::InvalidColor(color.to_string()));
        }
        self.configuration_for_edit(stage_id, config_id)?.color = color.to_string();
        Ok(())
    }

    /// Set a tolerance; once rounded it must lie strictly between 0 and 1 m
    pub fn set_tolerance(&mut self, kind: ToleranceKind, value: f64) -> Result<(), AdminError> {
        let rounded = round4(value);
        if !rounded.is_finite() || rounded <= 0.0 || rounded >= 1.0 {
            return Err(AdminError::InvalidTolerance(value));
        }
        let value = rounded;
        match kind {
            ToleranceKind::Individual => self.tolerance.individual = value,
            ToleranceKind::Total => self.tolerance.total = value,
        }
        info!(kind = kind.as_str(), value, "updated tolerance");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToleranceSettings;

    fn data() -> HincasData {
        HincasData {
            stages: vec![Stage {
                id: "S1".to_string(),
                name: "Stage 1".to_string(),
                configurations: vec![Configuration {
                    id: "C1".to_string(),
                    name: "Config 1".to_string(),
                    color: "#112233".to_string(),
                    expected_distances: vec![1.0, 2.0],
                    expected_total: 3.0,
                }],
            }],
            tolerance: ToleranceSettings::default(),
        }
    }

    #[test]
    fn test_update_distance_recomputes_total() {
        let mut data = data();
        data.update_distance("S1", "C1", 1, 2.123456).unwrap();
        let config = data.configuration("S1", "C1").unwrap();
        assert_eq!(config.expected_distances[1], 2.1235);
        assert_eq!(config.expected_total, 3.1235);
    }

    #[test]
    fn test_update_distance_rejects_bad_values() {
        let mut data = data();
        for bad in [0.0, -1.0, 100.5, f64::NAN] {
            assert!(matches!(
                data.update_distance("S1", "C1", 0, bad),
                Err(AdminError::InvalidDistance { .. })
            ));
        }
        assert_eq!(
            data.update_distance("S1", "C1", 5, 1.0),
            Err(AdminError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(
            data.update_distance("S9", "C1", 0, 1.0),
            Err(AdminError::StageNotFound("S9".to_string()))
        );
        assert_eq!(data, self::data());
    }

    #[test]
    fn test_add_and_delete_configuration() {
        let mut data = data();
        let id = data.add_configuration("S1").unwrap();
        assert!(id.starts_with("S1_NEW_"));
        let added = data.configuration("S1", &id).unwrap();
        assert_eq!(added.len(), NEW_CONFIGURATION_SLOTS);
        assert_eq!(added.name, "New configuration 2");
        assert!(is_valid_color(&added.color));

        data.delete_configuration("S1", &id).unwrap();
        assert!(data.configuration("S1", &id).is_none());
        assert!(data.delete_configuration("S1", &id).is_err());
    }

    #[test]
    fn test_rename_configuration() {
        let mut data = data();
        data.rename_configuration("S1", "C1", "  Row A ").unwrap();
        assert_eq!(data.configuration("S1", "C1").unwrap().name, "Row A");
        assert_eq!(data.rename_configuration("S1", "C1", "   "), Err(AdminError::EmptyName));
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            data.rename_configuration("S1", "C1", &long),
            Err(AdminError::NameTooLong { max: MAX_NAME_LEN })
        );
    }

    #[test]
    fn test_set_color() {
        let mut data = data();
        data.set_color("S1", "C1", "#A0b1C2").unwrap();
        assert!(data.set_color("S1", "C1", "A0B1C2").is_err());
        assert!(data.set_color("S1", "C1", "#A0B1CZ").is_err());
    }

    #[test]
    fn test_set_tolerance() {
        let mut data = data();
        data.set_tolerance(ToleranceKind::Total, 0.050049).unwrap();
        assert_eq!(data.tolerance.total, 0.05);
        assert!(data.set_tolerance(ToleranceKind::Individual, 1.0).is_err());
        assert!(data.set_tolerance(ToleranceKind::Individual, 0.0).is_err());
        assert_eq!(data.tolerance.individual, 0.04);
    }

    #[test]
    fn test_bounds_apply_to_rounded_values() {
        let mut data = data();
        assert_eq!(
            data.set_tolerance(ToleranceKind::Individual, 0.00004),
            Err(AdminError::InvalidTolerance(0.00004))
        );
        assert_eq!(
            data.set_tolerance(ToleranceKind::Total, 0.99996),
            Err(AdminError::InvalidTolerance(0.99996))
        );
        data.set_tolerance(ToleranceKind::Total, 0.99994).unwrap();
        assert_eq!(data.tolerance.total, 0.9999);
        data.set_tolerance(ToleranceKind::Individual, 0.00006).unwrap();
        assert_eq!(data.tolerance.individual, 0.0001);

        assert!(matches!(
            data.update_distance("S1", "C1", 0, 0.00001),
            Err(AdminError::InvalidDistance { .. })
        ));
        assert_eq!(data.configuration("S1", "C1").unwrap().expected_distances[0], 1.0);
        data.update_distance("S1", "C1", 0, 100.00004).unwrap();
        assert_eq!(data.configuration("S1", "C1").unwrap().expected_distances[0], 100.0);
    }
}
