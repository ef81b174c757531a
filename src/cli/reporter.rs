// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Terminal output with colored formatting

use colored::*;

use crate::config::HincasData;
use crate::export::format::{distance, signed};
use crate::history::HistoryRecord;
use crate::validation::{TotalValidation, ValidationResult, ValidationSession};

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the current state of a session
    pub fn report_session(session: &ValidationSession) {
        let config = session.configuration();
        let tolerance = session.tolerance();

        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {} / {} ({})",
            "Configuration:".bold(),
            session.stage_name().cyan(),
            config.name.cyan(),
            config.id.bright_black()
        );
        println!(
            "  {} ±{} m per hinca, ±{} m total",
            "Tolerance:".bright_black(),
            distance(tolerance.individual),
            distance(tolerance.total)
        );
        println!(
            "  {} {} ({} of {} hincas measured)",
            "State:".bright_black(),
            session.state().as_str(),
            session.filled_count(),
            config.len()
        );
        println!("{}", "━".repeat(80).bright_black());

        println!(
            "  {:<8} {:>12} {:>12} {:>12}  {}",
            "Hinca".bold(),
            "Expected".bold(),
            "Measured".bold(),
            "Difference".bold(),
            "Status".bold()
        );
        for (i, expected) in config.expected_distances.iter().enumerate() {
            match session.result_for(i) {
                Some(result) => Self::print_result_row(result),
                None => println!(
                    "  {:<8} {:>12} {:>12} {:>12}  {}",
                    format!("Hinc {}", i + 1),
                    distance(*expected),
                    "—".bright_black(),
                    "",
                    "pending".yellow()
                ),
            }
        }

        match session.total_validation() {
            Some(total) => Self::print_total_row(total),
            None => println!(
                "  {:<8} {:>12} {:>12} {:>12}  {}",
                "Total".bold(),
                distance(config.expected_total),
                "—".bright_black(),
                "",
                format!("{} of {} measured", session.filled_count(), config.len()).yellow()
            ),
        }

        println!("{}", "━".repeat(80).bright_black());
        Self::print_verdict(session.all_valid(), session.filled_count() > 0);
        println!("{}", "━".repeat(80).bright_black());
    }

    fn print_result_row(result: &ValidationResult) {
        let diff = signed(result.difference);
        println!(
            "  {:<8} {:>12} {:>12} {:>12}  {}",
            format!("Hinc {}", result.index + 1),
            distance(result.expected),
            distance(result.measured),
            if result.is_valid { diff.green() } else { diff.red() },
            Self::status(result.is_valid)
        );
    }

    fn print_total_row(total: &TotalValidation) {
        let diff = signed(total.difference);
        println!(
            "  {:<8} {:>12} {:>12} {:>12}  {}",
            "Total".bold(),
            distance(total.expected),
            distance(total.measured),
            if total.is_valid { diff.green() } else { diff.red() },
            Self::status(total.is_valid)
        );
    }

    fn status(valid: bool) -> ColoredString {
        if valid {
            "✓".green()
        } else {
            "✗".red()
        }
    }

    fn print_verdict(valid: bool, started: bool) {
        if valid {
            println!("{} {}", "✅".green(), "All distances within tolerance".green().bold());
        } else if started {
            println!("{} {}", "❌".red(), "Validation not passed".red().bold());
        } else {
            println!("{} {}", "•".bright_black(), "No measurements entered".bright_black());
        }
    }

    /// List stages and their configurations
    pub fn report_stages(data: &HincasData) {
        println!(
            "\n{} ±{} m per hinca, ±{} m total",
            "Tolerance:".bold(),
            distance(data.tolerance.individual),
            distance(data.tolerance.total)
        );
        for stage in &data.stages {
            println!("\n{} {}", "Stage".bold(), stage.id.cyan());
            for config in &stage.configurations {
                println!(
                    "  {:<24} {:<28} {:>3} hincas  total {} m",
                    config.id.cyan(),
                    config.name,
                    config.len(),
                    distance(config.expected_total)
                );
            }
        }
    }

    /// One line per history record
    pub fn report_history<'a>(records: impl IntoIterator<Item = &'a HistoryRecord>) {
        let mut count = 0;
        for record in records {
            count += 1;
            println!(
                "  {} {:<15} {:<22} {:<12} {:<20} total {} m ({})",
                Self::status(record.is_valid()),
                record.id.bright_black(),
                record.timestamp,
                record.stage_name.cyan(),
                record.configuration_id,
                distance(record.total),
                signed(record.total_validation.difference)
            );
        }
        if count == 0 {
            println!("  {}", "No validations recorded".bright_black());
        }
    }

    /// Full detail of one record
    pub fn report_record(record: &HistoryRecord) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Record:".bold(), record.id.cyan());
        println!("  {} {}", "Date:".bright_black(), record.timestamp);
        println!("  {} {}", "Stage:".bright_black(), record.stage_name);
        println!("  {} {}", "Configuration:".bright_black(), record.configuration_id);
        if let Some(description) = &record.description {
            println!("  {} {}", "Description:".bright_black(), description);
        }
        println!("{}", "━".repeat(80).bright_black());
        for result in &record.results {
            Self::print_result_row(result);
        }
        Self::print_total_row(&record.total_validation);
        println!("{}", "━".repeat(80).bright_black());
        Self::print_verdict(record.is_valid(), true);
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report success
    pub fn report_success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }
}
