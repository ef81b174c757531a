// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration document model

use serde::{Deserialize, Serialize};

/// Allowed deviations, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceSettings {
    /// Maximum absolute deviation per hinca
    pub individual: f64,
    /// Maximum absolute deviation of the total
    pub total: f64,
}

impl Default for ToleranceSettings {
    fn default() -> Self {
        Self {
            individual: 0.04,
            total: 0.04,
        }
    }
}

/// Named set of expected inter-hinca distances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "distances")]
    pub expected_distances: Vec<f64>,
    /// Stored independently of `expected_distances` and used as-is
    #[serde(rename = "totalDistance")]
    pub expected_total: f64,
}

impl Configuration {
    /// Number of hincas (measurement slots)
    pub fn len(&self) -> usize {
        self.expected_distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected_distances.is_empty()
    }
}

/// Group of configurations for one equipment/project phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub configurations: Vec<Configuration>,
}

impl Stage {
    pub fn configuration(&self, id: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.id == id)
    }

    pub fn configuration_mut(&mut self, id: &str) -> Option<&mut Configuration> {
        self.configurations.iter_mut().find(|c| c.id == id)
    }
}

/// The full configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HincasData {
    pub stages: Vec<Stage>,
    pub tolerance: ToleranceSettings,
}

impl HincasData {
    pub fn stage(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn stage_mut(&mut self, id: &str) -> Option<&mut Stage> {
        self.stages.iter_mut().find(|s| s.id == id)
    }

    /// Look up a configuration within a stage
    pub fn configuration(&self, stage_id: &str, config_id: &str) -> Option<&Configuration> {
        self.stage(stage_id)?.configuration(config_id)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
