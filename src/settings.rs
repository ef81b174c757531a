// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Application settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::history::DEFAULT_TIMESTAMP_FORMAT;

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "hincas.toml";

/// File holding the configuration document inside the data directory
pub const DATA_FILE: &str = "hincasData.json";

/// File holding the validation history inside the data directory
pub const HISTORY_FILE: &str = "hincasHistory.json";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Directory holding the persisted configuration and history
    pub data_dir: PathBuf,
    /// Directory exports are written to
    pub export_dir: PathBuf,
    /// chrono format string of record timestamps
    pub timestamp_format: String,
    /// Stage preselected by the wizard
    pub default_stage: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".hincas"),
            export_dir: PathBuf::from("exports"),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            default_stage: None,
        }
    }
}

impl AppSettings {
    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load settings with environment variable overrides
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = if Path::new(SETTINGS_FILE).exists() {
            Self::from_file(SETTINGS_FILE)?
        } else {
            Self::default()
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply `HINCAS_*` overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("HINCAS_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("HINCAS_EXPORT_DIR") {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(format) = lookup("HINCAS_TIMESTAMP_FORMAT") {
            self.timestamp_format = format;
        }
        if let Some(stage) = lookup("HINCAS_DEFAULT_STAGE") {
            self.default_stage = Some(stage).filter(|s| !s.is_empty());
        }
    }

    /// Save settings to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hincas.toml");
        let settings = AppSettings {
            default_stage: Some("162M".to_string()),
            ..AppSettings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(AppSettings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hincas.toml");
        std::fs::write(&path, "data_dir = \"/tmp/hincas\"\n").unwrap();
        let settings = AppSettings::from_file(&path).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/hincas"));
        assert_eq!(settings.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HINCAS_DATA_DIR", "/data"),
            ("HINCAS_TIMESTAMP_FORMAT", "%Y"),
        ]
        .into_iter()
        .collect();
        let mut settings = AppSettings::default();
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.data_path(), PathBuf::from("/data").join(DATA_FILE));
        assert_eq!(settings.timestamp_format, "%Y");
        assert_eq!(settings.export_dir, PathBuf::from("exports"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hincas.toml");
        std::fs::write(&path, "data_dir = [").unwrap();
        assert!(matches!(AppSettings::from_file(&path), Err(SettingsError::Parse { .. })));
    }
}
