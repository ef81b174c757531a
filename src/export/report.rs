// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Printable report: one page per record, pages separated by form feeds

use super::format::{distance, signed};
use crate::history::HistoryRecord;

/// Page separator understood by printers and pagers
pub const PAGE_BREAK: char = '\u{000C}';

const OUT_OF_TOLERANCE: &str = "  ✗ out of tolerance";

/// Lines of the page for one record; the first line is the title
pub fn page_lines(number: usize, record: &HistoryRecord) -> Vec<String> {
    let mut lines = vec![
        format!("Validation {}", number),
        "=".repeat(40),
        format!("Date: {}", record.timestamp),
        format!("Stage: {}", record.stage_name),
        format!("Configuration: {}", record.configuration_id),
        format!(
            "Status: {}",
            if record.is_valid() { "Valid ✓" } else { "Invalid ✗" }
        ),
        String::new(),
        "Measurements:".to_string(),
    ];

    for (i, measured) in record.measurements.iter().enumerate() {
        lines.push(match record.result_for(i) {
            Some(result) => format!(
                "  Hinc {}: {} m → {} m | {} m{}",
                i + 1,
                distance(result.expected),
                distance(result.measured),
                signed(result.difference),
                if result.is_valid { "" } else { OUT_OF_TOLERANCE }
            ),
            None => format!("  Hinc {}: {} m", i + 1, distance(*measured)),
        });
    }

    let total = &record.total_validation;
    lines.push(String::new());
    lines.push(format!(
        "Total: {} m → {} m | {} m{}",
        distance(total.expected),
        distance(total.measured),
        signed(total.difference),
        if total.is_valid { "" } else { OUT_OF_TOLERANCE }
    ));

    if let Some(description) = &record.description {
        lines.push(String::new());
        lines.push(format!("Description: {}", description));
    }
    lines
}

pub fn render<'a>(records: impl IntoIterator<Item = &'a HistoryRecord>) -> String {
    let mut out = String::new();
    for (i, record) in records.into_iter().enumerate() {
        if i > 0 {
            out.push(PAGE_BREAK);
        }
        for line in page_lines(i + 1, record) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
