// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the validation engine and its collaborators

use thiserror::Error;

/// Errors raised by a [`crate::validation::ValidationSession`]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("slot {index} is out of range (configuration has {len} hincas)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("validation is incomplete: {filled} of {len} hincas measured")]
    Incomplete { filled: usize, len: usize },
}

/// Errors raised while importing a configuration document
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("expected a .json file, got {0}")]
    WrongExtension(String),

    #[error("file is too large ({size} bytes, maximum is {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("invalid JSON: {0}")]
    NotJson(String),

    #[error("invalid structure: missing \"stages\" array")]
    MissingStages,

    #[error("invalid structure: missing \"tolerance\" object")]
    MissingTolerance,

    #[error("invalid structure: tolerance must contain numeric \"individual\" and \"total\"")]
    NonNumericTolerance,

    #[error("invalid structure: stage {index} has no \"configurations\" array")]
    StageWithoutConfigurations { index: usize },

    #[error("malformed configuration document: {0}")]
    Malformed(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by administrative edits of the configuration document
#[derive(Debug, Error, PartialEq)]
pub enum AdminError {
    #[error("stage not found: {0}")]
    StageNotFound(String),

    #[error("configuration not found: {0}")]
    ConfigurationNotFound(String),

    #[error("distance index {index} out of range (configuration has {len} hincas)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("distance must be a number greater than 0 and at most {max} m, got {value}")]
    InvalidDistance { value: f64, max: f64 },

    #[error("tolerance must be a number greater than 0 and less than 1 m, got {0}")]
    InvalidTolerance(f64),

    #[error("name must not be empty")]
    EmptyName,

    #[error("name must not exceed {max} characters")]
    NameTooLong { max: usize },

    #[error("invalid colour {0:?}, expected #RRGGBB")]
    InvalidColor(String),
}

/// Errors raised by a persisted repository
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt stored data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors raised by the wizard navigation
#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("cannot {action} while at step {step}")]
    InvalidTransition { action: &'static str, step: &'static str },

    #[error("a configuration must have at least one hinca")]
    NoSlots,
}

/// Errors raised while loading application settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
