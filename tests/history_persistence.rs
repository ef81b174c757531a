// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! History records: building, persistence and exports

use anyhow::Result;
use chrono::{Local, TimeZone};
use hincas::config::{default_data, Configuration, HincasData, ToleranceSettings};
use hincas::export::{self, pdf, report::PAGE_BREAK, ExportFormat};
use hincas::history::{ExportFilter, HistoryLog, HistoryRecord, HistoryRecordBuilder};
use hincas::storage::{JsonFileRepository, Repository};
use hincas::store::FileStore;
use hincas::{start_session, AppSettings, SessionError, ValidationSession};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

fn filled_session(data: &HincasData, offset: f64) -> ValidationSession {
    let stage = &data.stages[0];
    let config = &stage.configurations[0];
    let mut session = start_session(data, &stage.id, &config.id).unwrap();
    for (i, expected) in config.expected_distances.iter().enumerate() {
        session.set_measurement(i, Some(expected + offset)).unwrap();
    }
    session
}

fn build(builder: &mut HistoryRecordBuilder, session: &ValidationSession, description: Option<&str>) -> HistoryRecord {
    let now = Local.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
    builder
        .build_at(session, description.map(str::to_string), now)
        .unwrap()
}

#[test]
fn test_record_survives_json_file_roundtrip() -> Result<()> {
    let dir = TempDir::new()?;
    let data = default_data();
    let session = filled_session(&data, 0.01);
    let record = build(&mut HistoryRecordBuilder::new(), &session, Some("north row"));

    assert_eq!(record.timestamp, "14/03/2025, 09:30:00");
    assert_eq!(record.stage_name, data.stages[0].name);
    assert_eq!(record.results.len(), record.measurements.len());

    let repo = JsonFileRepository::<HistoryLog>::new(dir.path().join("history.json"));
    repo.save(&HistoryLog::from_records(vec![record.clone()]))?;
    let loaded = repo.load()?.unwrap();
    assert_eq!(loaded.records(), &[record.clone()]);

    let raw = std::fs::read_to_string(repo.path())?;
    assert!(raw.contains("\"stage\""));
    assert!(raw.contains("\"totalValidation\""));
    assert!(raw.contains("\"isValid\""));
    Ok(())
}

#[test]
fn test_generated_records_roundtrip_exactly() -> Result<()> {
    let dir = TempDir::new()?;
    let mut rng = StdRng::seed_from_u64(0x4849_4e43);
    let mut builder = HistoryRecordBuilder::new();
    let mut history = HistoryLog::new();

    for i in 0..5000 {
        let expected: Vec<f64> = (0..2).map(|_| rng.gen_range(1..=200_000) as f64 / 10_000.0).collect();
        let config = Configuration {
            id: format!("GEN_{}", i),
            name: "Generated".to_string(),
            color: "#000000".to_string(),
            expected_total: expected.iter().sum(),
            expected_distances: expected,
        };
        let mut session = ValidationSession::new("Generated", config, ToleranceSettings::default());
        for slot in 0..2 {
            session.set_measurement(slot, Some(rng.gen_range(1..=200_000) as f64 / 10_000.0))?;
        }
        let record = build(&mut builder, &session, None);

        let json = serde_json::to_string(&record)?;
        let back: HistoryRecord = serde_json::from_str(&json)?;
        assert_eq!(back, record, "record {} changed after JSON round-trip: {}", i, json);
        history.push(record);
    }

    let repo = JsonFileRepository::<HistoryLog>::new(dir.path().join("history.json"));
    repo.save(&history)?;
    assert_eq!(repo.load()?, Some(history));
    Ok(())
}

#[test]
fn test_incomplete_session_cannot_be_recorded() {
    let data = default_data();
    let stage = &data.stages[0];
    let config = &stage.configurations[0];
    let mut session = start_session(&data, &stage.id, &config.id).unwrap();
    session.set_measurement(0, Some(8.0)).unwrap();

    let mut builder = HistoryRecordBuilder::new();
    let err = session.commit(&mut builder, None).unwrap_err();
    assert_eq!(
        err,
        SessionError::Incomplete {
            filled: 1,
            len: config.len()
        }
    );
    assert_eq!(session.filled_count(), 1);
}

#[test]
fn test_commit_resets_session_and_ids_increase() {
    let data = default_data();
    let mut builder = HistoryRecordBuilder::new();
    let mut history = HistoryLog::new();

    for _ in 0..3 {
        let mut session = filled_session(&data, 0.0);
        let record = session.commit(&mut builder, Some("batch".to_string())).unwrap();
        assert_eq!(session.filled_count(), 0);
        assert!(session.description().is_none());
        history.push(record);
    }

    let ids: Vec<i64> = history.iter().map(|r| r.id.parse().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]), "newest first, unique: {:?}", ids);

    let mut next = HistoryRecordBuilder::new().after_existing(history.iter());
    let record = filled_session(&data, 0.0).commit(&mut next, None).unwrap();
    assert!(record.id.parse::<i64>().unwrap() > ids[0]);
}

#[test]
fn test_file_store_falls_back_on_corrupt_files() -> Result<()> {
    let dir = TempDir::new()?;
    let settings = AppSettings {
        data_dir: dir.path().to_path_buf(),
        ..AppSettings::default()
    };
    std::fs::write(settings.data_path(), "{ not json")?;
    std::fs::write(settings.history_path(), "[{\"id\": 1}]")?;

    let store = FileStore::open(&settings);
    assert_eq!(store.load_data(), default_data());
    assert!(store.load_history().is_empty());

    let mut history = HistoryLog::new();
    let mut session = filled_session(&default_data(), 0.02);
    history.push(session.commit(&mut HistoryRecordBuilder::new(), None).unwrap());
    store.save_history(&history)?;
    assert_eq!(store.load_history().len(), 1);
    Ok(())
}

#[test]
fn test_csv_export() -> Result<()> {
    let data = default_data();
    let mut builder = HistoryRecordBuilder::new();
    let valid = build(&mut builder, &filled_session(&data, 0.0), Some("row 1, \"east\""));
    let invalid = build(&mut builder, &filled_session(&data, 0.05), None);
    let history = HistoryLog::from_records(vec![invalid, valid]);

    let csv = String::from_utf8(ExportFormat::Csv.render(history.filter(ExportFilter::All))?)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Timestamp,Stage,Configuration,Hinc 1,"));
    assert!(lines[0].ends_with(",Total measured,Total expected,Total difference,Verdict,Description"));
    assert!(lines[1].starts_with("\"14/03/2025, 09:30:00\""));
    assert!(lines[1].contains("7.9950→8.0450|+0.0500"));
    assert!(lines[1].ends_with(",INVALID,"));
    assert!(lines[2].ends_with(",VALID,\"row 1, \"\"east\"\"\""));

    let only_valid = String::from_utf8(ExportFormat::Csv.render(history.filter(ExportFilter::Valid))?)?;
    assert_eq!(only_valid.lines().count(), 2);
    Ok(())
}

#[test]
fn test_report_export_paginates() -> Result<()> {
    let dir = TempDir::new()?;
    let data = default_data();
    let mut builder = HistoryRecordBuilder::new();
    let first = build(&mut builder, &filled_session(&data, 0.0), Some("first pass"));
    let second = build(&mut builder, &filled_session(&data, 0.05), None);
    let history = HistoryLog::from_records(vec![first, second]);

    let path = dir.path().join("out").join(ExportFormat::Report.file_name());
    let written = export::write(ExportFormat::Report, history.iter(), &path)?;
    let text = std::fs::read_to_string(written)?;

    let pages: Vec<&str> = text.split(PAGE_BREAK).collect();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].starts_with("Validation 1\n"));
    assert!(pages[0].contains("Status: Valid ✓"));
    assert!(pages[0].contains("Description: first pass"));
    assert!(pages[1].starts_with("Validation 2\n"));
    assert!(pages[1].contains("Status: Invalid ✗"));
    assert!(pages[1].contains("✗ out of tolerance"));
    Ok(())
}

#[test]
fn test_export_selected_ids() {
    let data = default_data();
    let mut builder = HistoryRecordBuilder::new();
    let a = build(&mut builder, &filled_session(&data, 0.0), None);
    let b = build(&mut builder, &filled_session(&data, 0.0), None);
    let history = HistoryLog::from_records(vec![b.clone(), a]);

    let selected = history.select(&[b.id.as_str()]);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, b.id);
}

/// Count `/Type /Page` dictionaries, skipping the `/Pages` tree node
fn pdf_page_count(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while let Some(pos) = bytes[i..].windows(5).position(|w| w == b"/Type") {
        let mut j = i + pos + 5;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let rest = &bytes[j..];
        if rest.starts_with(b"/Page") && rest.get(5).map_or(true, |c| !c.is_ascii_alphanumeric()) {
            count += 1;
        }
        i = j;
    }
    count
}

#[test]
fn test_pdf_export_has_one_page_per_record() -> Result<()> {
    let dir = TempDir::new()?;
    let data = default_data();
    let mut builder = HistoryRecordBuilder::new();
    let records: Vec<HistoryRecord> = [0.0, 0.05, 0.01]
        .iter()
        .map(|offset| build(&mut builder, &filled_session(&data, *offset), Some("Medición norte")))
        .collect();
    let history = HistoryLog::from_records(records);

    let pages = pdf::layout(history.iter());
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[1][0], "Validation 2");
    assert!(pages[1].iter().any(|l| l.contains("-> 8.0450 m | +0.0500 m  X out of tolerance")));
    assert!(pages.iter().flatten().all(|l| l.is_ascii()));

    let path = dir.path().join(ExportFormat::Pdf.file_name());
    let written = export::write(ExportFormat::Pdf, history.iter(), &path)?;
    let bytes = std::fs::read(written)?;
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(pdf_page_count(&bytes), 3);
    Ok(())
}

#[test]
fn test_pdf_long_record_continues_on_next_page() {
    let expected: Vec<f64> = vec![1.0; 60];
    let config = Configuration {
        id: "LONG".to_string(),
        name: "Long row".to_string(),
        color: "#000000".to_string(),
        expected_total: 60.0,
        expected_distances: expected,
    };
    let mut session = ValidationSession::new("Long", config, ToleranceSettings::default());
    for slot in 0..60 {
        session.set_measurement(slot, Some(1.0)).unwrap();
    }
    let record = build(&mut HistoryRecordBuilder::new(), &session, None);

    let pages = pdf::layout([&record]);
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|p| p[0] == "Validation 1"));
}
