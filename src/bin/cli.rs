// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hincas Validator CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use hincas::cli::Reporter;
use hincas::config::{self, HincasData, ToleranceKind};
use hincas::export::{self, ExportFormat};
use hincas::history::{ExportFilter, HistoryLog, HistoryRecord, HistoryRecordBuilder};
use hincas::store::FileStore;
use hincas::{start_session, telemetry, AppSettings, ValidationSession, Wizard, WizardStep};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hincas")]
#[command(about = "Validate measured distances between hincas against expected configurations", long_about = None)]
struct Cli {
    /// Directory holding the configuration and history
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stages and configurations
    Stages,

    /// Validate a set of measurements
    Validate {
        /// Stage id
        #[arg(short, long)]
        stage: String,

        /// Configuration id
        #[arg(short, long)]
        config: String,

        /// Description stored with the record
        #[arg(short, long)]
        describe: Option<String>,

        /// Commit the validation to history
        #[arg(long)]
        save: bool,

        /// Measured distances in metres, `-` for a hinca not yet measured
        #[arg(value_name = "VALUES", allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Guided entry, one hinca at a time
    Wizard,

    /// Inspect and export committed validations
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Administer the configuration document
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List records, newest first
    List,

    /// Show one record in full
    Show { id: String },

    /// Delete one record
    Delete { id: String },

    /// Delete every record
    Clear,

    /// Export records (csv, report, pdf)
    Export {
        format: String,

        /// Which records to export (all, valid, invalid)
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Export only these record ids
        #[arg(long, num_args = 1..)]
        ids: Vec<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the configuration document to a JSON file
    Export { path: Option<PathBuf> },

    /// Replace the configuration document with a JSON file
    Import { path: PathBuf },

    /// Restore the bundled configuration document
    Reset,

    /// Set a tolerance (individual, total)
    SetTolerance { kind: String, value: f64 },

    /// Set one expected distance (INDEX is 1-based)
    SetDistance {
        stage: String,
        config: String,
        index: usize,
        value: f64,
    },

    /// Add a blank configuration to a stage
    Add { stage: String },

    /// Delete a configuration
    Delete { stage: String, config: String },

    /// Rename a configuration
    Rename {
        stage: String,
        config: String,
        name: String,
    },

    /// Set a configuration colour (#RRGGBB)
    Color {
        stage: String,
        config: String,
        color: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let mut settings = AppSettings::load().context("Failed to load settings")?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    let store = FileStore::open(&settings);

    let passed = match cli.command {
        Commands::Stages => {
            Reporter::report_stages(&store.load_data());
            true
        }
        Commands::Validate {
            stage,
            config,
            describe,
            save,
            values,
        } => validate_command(&store, &settings, &stage, &config, &values, describe, save)?,
        Commands::Wizard => {
            wizard_command(&store, &settings)?;
            true
        }
        Commands::History { command } => {
            history_command(&store, &settings, command)?;
            true
        }
        Commands::Config { command } => {
            config_command(&store, command)?;
            true
        }
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

fn open_session(data: &HincasData, stage: &str, config: &str) -> Result<ValidationSession> {
    match start_session(data, stage, config) {
        Some(session) => Ok(session),
        None => bail!("Unknown configuration {} in stage {}", config, stage),
    }
}

fn record_builder(settings: &AppSettings, history: &HistoryLog) -> HistoryRecordBuilder {
    HistoryRecordBuilder::with_timestamp_format(settings.timestamp_format.clone())
        .after_existing(history.iter())
}

fn commit(store: &FileStore, settings: &AppSettings, session: &mut ValidationSession) -> Result<HistoryRecord> {
    let mut history = store.load_history();
    let mut builder = record_builder(settings, &history);
    let record = session.commit(&mut builder, None)?;
    history.push(record.clone());
    store.save_history(&history).context("Failed to save history")?;
    Ok(record)
}

fn validate_command(
    store: &FileStore,
    settings: &AppSettings,
    stage: &str,
    config: &str,
    values: &[String],
    describe: Option<String>,
    save: bool,
) -> Result<bool> {
    let data = store.load_data();
    let mut session = open_session(&data, stage, config)?;

    let len = session.measurements().len();
    if values.len() > len {
        bail!("{} values given, configuration {} has {} hincas", values.len(), config, len);
    }
    for (i, value) in values.iter().enumerate() {
        let input = if value == "-" { "" } else { value.as_str() };
        session.set_measurement_input(i, input)?;
    }
    session.set_description(describe);

    Reporter::report_session(&session);
    let passed = session.all_valid();

    if save {
        if !session.is_complete() {
            let missing: Vec<String> = session.outstanding().iter().map(|i| format!("Hinc {}", i + 1)).collect();
            Reporter::report_error(&format!("Cannot save, missing {}", missing.join(", ")));
            return Ok(false);
        }
        let record = commit(store, settings, &mut session)?;
        Reporter::report_success(&format!("Saved validation {}", record.id));
    }

    Ok(passed)
}

/// Read one trimmed line; `None` at end of input
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{} ", label.bold());
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Resolve a menu answer given as a 1-based number or an id
fn pick<'a>(answer: &str, ids: &[&'a str]) -> Option<&'a str> {
    match answer.parse::<usize>() {
        Ok(n) if n >= 1 => ids.get(n - 1).copied(),
        _ => ids.iter().copied().find(|id| *id == answer),
    }
}

fn wizard_command(store: &FileStore, settings: &AppSettings) -> Result<()> {
    let data = store.load_data();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut wizard = Wizard::new();
    let mut session: Option<ValidationSession> = None;

    if let Some(stage) = settings.default_stage.as_deref().filter(|s| data.stage(s).is_some()) {
        wizard.select_stage(stage)?;
    }

    println!("{}", "Hincas validation wizard ('b' back, 'q' quit)".bold());
    loop {
        println!(
            "\n{} {}/4 {}",
            "Step".bright_black(),
            wizard.step().number(),
            wizard.step().as_str().cyan()
        );
        match wizard.step() {
            WizardStep::SelectStage => {
                let ids: Vec<&str> = data.stages.iter().map(|s| s.id.as_str()).collect();
                for (i, stage) in data.stages.iter().enumerate() {
                    println!("  {}) {}", i + 1, stage.name);
                }
                let Some(answer) = prompt(&mut input, "Stage:")? else { break };
                match answer.as_str() {
                    "q" => break,
                    "b" => {}
                    _ => match pick(&answer, &ids) {
                        Some(id) => wizard.select_stage(id)?,
                        None => Reporter::report_error(&format!("No stage {}", answer)),
                    },
                }
            }
            WizardStep::SelectConfiguration => {
                let Some(stage) = wizard.stage_id().and_then(|id| data.stage(id)) else {
                    wizard.back();
                    continue;
                };
                let ids: Vec<&str> = stage.configurations.iter().map(|c| c.id.as_str()).collect();
                for (i, config) in stage.configurations.iter().enumerate() {
                    println!("  {}) {} ({} hincas)", i + 1, config.name, config.len());
                }
                let Some(answer) = prompt(&mut input, "Configuration:")? else { break };
                match answer.as_str() {
                    "q" => break,
                    "b" => wizard.back(),
                    _ => match pick(&answer, &ids) {
                        Some(id) => {
                            let started = open_session(&data, &stage.id, id)?;
                            match wizard.select_configuration(id, started.measurements().len()) {
                                Ok(()) => session = Some(started),
                                Err(e) => Reporter::report_error(&e.to_string()),
                            }
                        }
                        None => Reporter::report_error(&format!("No configuration {}", answer)),
                    },
                }
            }
            WizardStep::EnterMeasurements => {
                let Some(current) = session.as_mut() else {
                    wizard.back();
                    continue;
                };
                let slot = wizard.current_slot();
                let expected = current.configuration().expected_distances[slot];
                let entered = current.measurements()[slot]
                    .map(export::format::distance)
                    .unwrap_or_default();
                println!("  {} {}%", "Progress".bright_black(), wizard.progress());
                let label = format!(
                    "Hinc {} of {} (expected {} m) [{}]:",
                    slot + 1,
                    wizard.slot_count(),
                    export::format::distance(expected),
                    entered
                );
                let Some(answer) = prompt(&mut input, &label)? else { break };
                match answer.as_str() {
                    "q" => break,
                    "b" if slot == 0 => wizard.back(),
                    "b" => wizard.prev_slot()?,
                    "" => wizard.next_slot()?,
                    _ => {
                        current.set_measurement_input(slot, &answer)?;
                        if let Some(result) = current.result_for(slot) {
                            let diff = export::format::signed(result.difference);
                            if result.is_valid {
                                println!("  {} {}", "✓".green(), diff.green());
                            } else {
                                println!("  {} {}", "✗".red(), diff.red());
                            }
                            wizard.next_slot()?;
                        } else {
                            Reporter::report_error(&format!("Not a distance: {}", answer));
                        }
                    }
                }
            }
            WizardStep::Review => {
                let Some(current) = session.as_mut() else {
                    wizard.reset();
                    continue;
                };
                Reporter::report_session(current);
                let Some(answer) = prompt(&mut input, "[s]ave, [d]escribe, [b]ack, [n]ew, [q]uit:")? else {
                    break;
                };
                match answer.as_str() {
                    "s" => {
                        if !current.is_complete() {
                            Reporter::report_error("Every hinca must be measured before saving");
                            continue;
                        }
                        let record = commit(store, settings, current)?;
                        Reporter::report_success(&format!("Saved validation {}", record.id));
                        session = None;
                        wizard.reset();
                    }
                    "d" => {
                        let Some(text) = prompt(&mut input, "Description:")? else { break };
                        current.set_description(Some(text));
                    }
                    "b" => wizard.back(),
                    "n" => {
                        session = None;
                        wizard.reset();
                    }
                    "q" => break,
                    _ => Reporter::report_error(&format!("Unknown choice {}", answer)),
                }
            }
        }
    }

    Ok(())
}

fn history_command(store: &FileStore, settings: &AppSettings, command: HistoryCommands) -> Result<()> {
    let mut history = store.load_history();
    match command {
        HistoryCommands::List => Reporter::report_history(history.iter()),
        HistoryCommands::Show { id } => match history.get(&id) {
            Some(record) => Reporter::report_record(record),
            None => bail!("No record {}", id),
        },
        HistoryCommands::Delete { id } => {
            if !history.delete(&id) {
                bail!("No record {}", id);
            }
            store.save_history(&history).context("Failed to save history")?;
            Reporter::report_success(&format!("Deleted record {}", id));
        }
        HistoryCommands::Clear => {
            let count = history.len();
            history.clear();
            store.save_history(&history).context("Failed to save history")?;
            Reporter::report_success(&format!("Deleted {} records", count));
        }
        HistoryCommands::Export {
            format,
            filter,
            ids,
            output,
        } => {
            let Some(format) = ExportFormat::from_str(&format) else {
                bail!("Unknown export format {} (csv, report, pdf)", format);
            };
            let Some(filter) = ExportFilter::from_str(&filter) else {
                bail!("Unknown filter {} (all, valid, invalid)", filter);
            };
            let records: Vec<&HistoryRecord> = if ids.is_empty() {
                history.filter(filter)
            } else {
                history.select(&ids).into_iter().filter(|r| filter.matches(r)).collect()
            };
            if records.is_empty() {
                bail!("No records to export");
            }
            let path = output.unwrap_or_else(|| settings.export_dir.join(format.file_name()));
            let written = export::write(format, records.iter().copied(), &path)?;
            Reporter::report_success(&format!(
                "Exported {} records to {}",
                records.len(),
                written.display()
            ));
        }
    }
    Ok(())
}

fn config_command(store: &FileStore, command: ConfigCommands) -> Result<()> {
    let mut data = store.load_data();
    let message = match command {
        ConfigCommands::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(config::export_file_name()));
            let written = config::export_file(&data, &path)?;
            Reporter::report_success(&format!("Exported configuration to {}", written.display()));
            return Ok(());
        }
        ConfigCommands::Import { path } => {
            data = config::import_file(&path)?;
            format!("Imported {} stages from {}", data.stages.len(), path.display())
        }
        ConfigCommands::Reset => {
            store.reset_data().context("Failed to reset configuration")?;
            Reporter::report_success("Configuration restored to defaults");
            return Ok(());
        }
        ConfigCommands::SetTolerance { kind, value } => {
            let Some(kind) = ToleranceKind::from_str(&kind) else {
                bail!("Unknown tolerance {} (individual, total)", kind);
            };
            data.set_tolerance(kind, value)?;
            format!("{} tolerance set to {} m", kind.as_str(), value)
        }
        ConfigCommands::SetDistance {
            stage,
            config,
            index,
            value,
        } => {
            if index == 0 {
                bail!("Hinca numbers start at 1");
            }
            data.update_distance(&stage, &config, index - 1, value)?;
            let total = data
                .configuration(&stage, &config)
                .map(|c| c.expected_total)
                .unwrap_or_default();
            format!("Hinc {} set, total now {} m", index, export::format::distance(total))
        }
        ConfigCommands::Add { stage } => {
            let id = data.add_configuration(&stage)?;
            format!("Added configuration {}", id)
        }
        ConfigCommands::Delete { stage, config } => {
            data.delete_configuration(&stage, &config)?;
            format!("Deleted configuration {}", config)
        }
        ConfigCommands::Rename { stage, config, name } => {
            data.rename_configuration(&stage, &config, &name)?;
            format!("Renamed configuration {}", config)
        }
        ConfigCommands::Color { stage, config, color } => {
            data.set_color(&stage, &config, &color)?;
            format!("Colour of {} set to {}", config, color)
        }
    };
    store.save_data(&data).context("Failed to save configuration")?;
    Reporter::report_success(&message);
    Ok(())
}
