// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Persisted configuration document and history, behind repositories

use tracing::info;

use crate::config::{default_data, HincasData};
use crate::error::StorageError;
use crate::history::HistoryLog;
use crate::settings::AppSettings;
use crate::storage::{load_or_default, InMemoryRepository, JsonFileRepository, Repository};

/// The two persisted documents of the tool
pub struct Store<D, H> {
    data: D,
    history: H,
}

/// File-backed store under the settings' data directory
pub type FileStore = Store<JsonFileRepository<HincasData>, JsonFileRepository<HistoryLog>>;

/// Store kept entirely in memory
pub type MemoryStore = Store<InMemoryRepository<HincasData>, InMemoryRepository<HistoryLog>>;

impl FileStore {
    pub fn open(settings: &AppSettings) -> Self {
        Store::new(
            JsonFileRepository::new(settings.data_path()),
            JsonFileRepository::new(settings.history_path()),
        )
    }
}

impl MemoryStore {
    pub fn in_memory() -> Self {
        Store::new(InMemoryRepository::new(), InMemoryRepository::new())
    }
}

impl<D, H> Store<D, H>
where
    D: Repository<HincasData>,
    H: Repository<HistoryLog>,
{
    pub fn new(data: D, history: H) -> Self {
        Self { data, history }
    }

    /// Stored configuration document, or the bundled default
    pub fn load_data(&self) -> HincasData {
        load_or_default(&self.data, default_data)
    }

    pub fn save_data(&self, data: &HincasData) -> Result<(), StorageError> {
        self.data.save(data)
    }

    /// Drop the stored document and return the bundled default
    pub fn reset_data(&self) -> Result<HincasData, StorageError> {
        self.data.remove()?;
        info!("configuration reset to defaults");
        Ok(default_data())
    }

    /// Stored history, or an empty one
    pub fn load_history(&self) -> HistoryLog {
        load_or_default(&self.history, HistoryLog::new)
    }

    pub fn save_history(&self, history: &HistoryLog) -> Result<(), StorageError> {
        self.history.save(history)
    }
}
