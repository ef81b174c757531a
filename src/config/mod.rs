// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration document: model, import/export and administration

pub mod admin;
pub mod defaults;
pub mod model;
pub mod schema;

pub use admin::{is_valid_color, ToleranceKind};
pub use defaults::default_data;
pub use model::{Configuration, HincasData, Stage, ToleranceSettings};
pub use schema::{check_structure, parse_document};

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ImportError;

/// Largest configuration file accepted for import
pub const MAX_IMPORT_SIZE: u64 = 1024 * 1024;

/// Import a configuration document from a JSON file.
///
/// Nothing is returned unless the whole document passes the checks, so a
/// caller's current document is never replaced by partial data.
pub fn import_file(path: impl AsRef<Path>) -> Result<HincasData, ImportError> {
    let path = path.as_ref();
    let io_error = |source| ImportError::Io {
        path: path.display().to_string(),
        source,
    };

    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(ImportError::WrongExtension(path.display().to_string()));
    }

    let size = fs::metadata(path).map_err(io_error)?.len();
    if size > MAX_IMPORT_SIZE {
        return Err(ImportError::TooLarge {
            size,
            max: MAX_IMPORT_SIZE,
        });
    }

    let text = fs::read_to_string(path).map_err(io_error)?;
    let data = parse_document(&text)?;
    info!(path = %path.display(), stages = data.stages.len(), "imported configuration");
    Ok(data)
}

/// Default export file name, e.g. `hincas-config-2025-03-14.json`
pub fn export_file_name() -> String {
    format!("hincas-config-{}.json", Local::now().format("%Y-%m-%d"))
}

/// Write the document as pretty-printed JSON
pub fn export_file(data: &HincasData, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let json = data.to_json_pretty().context("Failed to serialize configuration")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write configuration file: {:?}", path))?;
    info!(path = %path.display(), "exported configuration");
    Ok(path.to_path_buf())
}
