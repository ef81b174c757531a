// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Built-in configuration document

use super::model::HincasData;
use super::schema::parse_document;
use crate::error::ImportError;

const DEFAULT_DATA: &str = include_str!("default_data.json");

/// Parse the bundled default document
pub fn try_default_data() -> Result<HincasData, ImportError> {
    parse_document(DEFAULT_DATA)
}

/// The bundled default document.
///
/// Falls back to an empty document with default tolerances if the bundled
/// file is ever broken; the test suite guards against that.
pub fn default_data() -> HincasData {
    try_default_data().unwrap_or_else(|e| {
        tracing::error!(error = %e, "bundled default configuration is invalid");
        HincasData {
            stages: Vec::new(),
            tolerance: Default::default(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::round4;

    #[test]
    fn test_bundled_document_parses() {
        let data = try_default_data().unwrap();
        assert!(!data.stages.is_empty());
        assert_eq!(data.tolerance.individual, 0.04);
    }

    #[test]
    fn test_bundled_totals_match_distances() {
        let data = default_data();
        for stage in &data.stages {
            assert!(!stage.configurations.is_empty());
            for config in &stage.configurations {
                assert!(config.expected_distances.iter().all(|d| *d > 0.0));
                assert_eq!(
                    round4(config.expected_distances.iter().sum()),
                    config.expected_total,
                    "{}",
                    config.id
                );
            }
        }
    }
}
