// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Structural check of imported configuration documents

use serde_json::Value;

use super::model::HincasData;
use crate::error::ImportError;

/// Check the document shape before trusting it.
///
/// Requires a `stages` array, a `tolerance` object with numeric
/// `individual` and `total`, and a `configurations` array in every stage.
pub fn check_structure(value: &Value) -> Result<(), ImportError> {
    let stages = value
        .get("stages")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingStages)?;

    let tolerance = value
        .get("tolerance")
        .filter(|t| t.is_object())
        .ok_or(ImportError::MissingTolerance)?;

    let numeric = |key: &str| tolerance.get(key).map(Value::is_number).unwrap_or(false);
    if !numeric("individual") || !numeric("total") {
        return Err(ImportError::NonNumericTolerance);
    }

    if let Some(index) = stages
        .iter()
        .position(|stage| !stage.get("configurations").map(Value::is_array).unwrap_or(false))
    {
        return Err(ImportError::StageWithoutConfigurations { index });
    }

    Ok(())
}

/// Parse and check a configuration document from JSON text
pub fn parse_document(text: &str) -> Result<HincasData, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|e| ImportError::NotJson(e.to_string()))?;
    check_structure(&value)?;
    serde_json::from_value(value).map_err(|e| ImportError::Malformed(e.to_string()))
}
