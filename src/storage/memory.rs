// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! In-memory repository, mainly for tests

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::marker::PhantomData;

use super::Repository;
use crate::error::StorageError;

/// Keeps the serialized document in memory.
///
/// The document is stored as JSON text so that load/save behave like the
/// file-backed repository, including on corrupt data.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    raw: RefCell<Option<String>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            raw: RefCell::new(None),
            _marker: PhantomData,
        }
    }

    /// Seed the store with raw text
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
            _marker: PhantomData,
        }
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<T>, StorageError> {
        match self.raw.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, document: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(document)?;
        *self.raw.borrow_mut() = Some(json);
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.raw.borrow_mut().take();
        Ok(())
    }
}
