// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Validation history: frozen records and the log that holds them

pub mod log;
pub mod record;

pub use log::{ExportFilter, HistoryLog};
pub use record::{HistoryRecord, HistoryRecordBuilder, DEFAULT_TIMESTAMP_FORMAT};
