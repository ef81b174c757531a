// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! History exports: CSV, printable report and PDF

pub mod csv;
pub mod format;
pub mod pdf;
pub mod report;

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::history::HistoryRecord;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Report,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "report",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "report" | "txt" | "print" => Some(ExportFormat::Report),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Default file name, e.g. `hincas_history_2025-03-14.csv`
    pub fn file_name(&self) -> String {
        format!(
            "hincas_history_{}.{}",
            Local::now().format("%Y-%m-%d"),
            self.extension()
        )
    }

    /// Render records to the bytes of an export file
    pub fn render<'a>(&self, records: impl IntoIterator<Item = &'a HistoryRecord>) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Csv => Ok(csv::render(records).into_bytes()),
            ExportFormat::Report => Ok(report::render(records).into_bytes()),
            ExportFormat::Pdf => pdf::render(records),
        }
    }
}

/// Render records and write them to `path`
pub fn write<'a>(
    format: ExportFormat,
    records: impl IntoIterator<Item = &'a HistoryRecord>,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create export directory: {:?}", parent))?;
    }
    let content = format.render(records)?;
    fs::write(path, content).with_context(|| format!("Failed to write export: {:?}", path))?;
    info!(path = %path.display(), format = format.as_str(), "exported history");
    Ok(path.to_path_buf())
}
