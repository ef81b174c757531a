// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSV export of history records, one row per record

use super::format::{distance, signed, slot_cell, verdict_label};
use crate::history::HistoryRecord;

/// Quote a field when it contains a separator, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row(out: &mut String, fields: &[String]) {
    let row: Vec<String> = fields.iter().map(|f| escape(f)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Render records as CSV.
///
/// One column per hinca, as many as the longest record has.
pub fn render<'a>(records: impl IntoIterator<Item = &'a HistoryRecord>) -> String {
    let records: Vec<&HistoryRecord> = records.into_iter().collect();
    let slots = records.iter().map(|r| r.measurements.len()).max().unwrap_or(0);

    let mut header = vec![
        "Timestamp".to_string(),
        "Stage".to_string(),
        "Configuration".to_string(),
    ];
    header.extend((1..=slots).map(|i| format!("Hinc {}", i)));
    header.extend(
        ["Total measured", "Total expected", "Total difference", "Verdict", "Description"]
            .iter()
            .map(|s| s.to_string()),
    );

    let mut out = String::new();
    push_row(&mut out, &header);

    for record in records {
        let mut row = vec![
            record.timestamp.clone(),
            record.stage_name.clone(),
            record.configuration_id.clone(),
        ];
        row.extend((0..slots).map(|i| record.result_for(i).map(slot_cell).unwrap_or_default()));
        row.push(distance(record.total_validation.measured));
        row.push(distance(record.total_validation.expected));
        row.push(signed(record.total_validation.difference));
        row.push(verdict_label(record.is_valid()).to_string());
        row.push(record.description.clone().unwrap_or_default());
        push_row(&mut out, &row);
    }

    out
}
