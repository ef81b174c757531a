// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Persisted state behind a repository interface

pub mod file;
pub mod memory;

pub use file::JsonFileRepository;
pub use memory::InMemoryRepository;

use tracing::warn;

use crate::error::StorageError;

/// Synchronous load/save of one document. Last write wins.
pub trait Repository<T> {
    /// Load the stored document, `None` when nothing has been stored yet
    fn load(&self) -> Result<Option<T>, StorageError>;

    /// Replace the stored document
    fn save(&self, document: &T) -> Result<(), StorageError>;

    /// Forget the stored document
    fn remove(&self) -> Result<(), StorageError>;
}

/// Load a document, falling back to `default` when nothing is stored or the
/// stored copy cannot be read.
pub fn load_or_default<T, R>(repository: &R, default: impl FnOnce() -> T) -> T
where
    R: Repository<T> + ?Sized,
{
    match repository.load() {
        Ok(Some(document)) => document,
        Ok(None) => default(),
        Err(e) => {
            warn!(error = %e, "failed to load stored data, using defaults");
            default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_default_on_corrupt_data() {
        let repo = InMemoryRepository::<Vec<u32>>::with_raw("{not json");
        let loaded = load_or_default(&repo, || vec![7]);
        assert_eq!(loaded, vec![7]);
    }

    #[test]
    fn test_load_or_default_on_empty_store() {
        let repo = InMemoryRepository::<Vec<u32>>::new();
        assert_eq!(load_or_default(&repo, Vec::new), Vec::<u32>::new());
    }

    #[test]
    fn test_load_or_default_returns_stored() {
        let repo = InMemoryRepository::<Vec<u32>>::new();
        repo.save(&vec![1u32, 2]).unwrap();
        assert_eq!(load_or_default(&repo, Vec::new), vec![1, 2]);
    }
}
