// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Newest-first log of committed validations

use serde::{Deserialize, Serialize};
use tracing::info;

use super::record::HistoryRecord;

/// Which records to include in a listing or export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFilter {
    #[default]
    All,
    Valid,
    Invalid,
}

impl ExportFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFilter::All => "all",
            ExportFilter::Valid => "valid",
            ExportFilter::Invalid => "invalid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(ExportFilter::All),
            "valid" => Some(ExportFilter::Valid),
            "invalid" => Some(ExportFilter::Invalid),
            _ => None,
        }
    }

    pub fn matches(&self, record: &HistoryRecord) -> bool {
        match self {
            ExportFilter::All => true,
            ExportFilter::Valid => record.is_valid(),
            ExportFilter::Invalid => !record.is_valid(),
        }
    }
}

/// History of committed records, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    /// Prepend a record
    pub fn push(&mut self, record: HistoryRecord) {
        info!(id = %record.id, "adding record to history");
        self.records.insert(0, record);
    }

    /// Remove a record by id; returns whether one was removed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            info!(id, "deleted history record");
        }
        removed
    }

    pub fn clear(&mut self) {
        info!(count = self.records.len(), "clearing history");
        self.records.clear();
    }

    pub fn get(&self, id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching a verdict filter, in log order
    pub fn filter(&self, filter: ExportFilter) -> Vec<&HistoryRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Records whose id is in `ids`, in log order
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&HistoryRecord> {
        self.records
            .iter()
            .filter(|r| ids.iter().any(|id| id.as_ref() == r.id))
            .collect()
    }
}
