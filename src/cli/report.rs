//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format
//! and to print command summaries. Separate from core logic to allow lingot
//! to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::json;
use unicode_width::UnicodeWidthStr;

use super::commands::{CleanSummary, CommandResult, CommandSummary, InitSummary, UpdateSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::CatalogStats;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format, followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print the message shown when a check finds nothing.
pub fn print_success_to<W: Write>(catalogs: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} - no issues found",
            catalogs,
            if catalogs == 1 { "catalog" } else { "catalogs" }
        )
        .green()
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Message(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}",
                "-->".blue(),
                ctx.file_path(),
                ctx.line()
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Message(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

pub fn print(result: &CommandResult) {
    let stdout = &mut io::stdout().lock();
    match &result.summary {
        CommandSummary::Check => {
            report_to(&result.issues, stdout);
            if result.issues.is_empty() {
                print_success_to(result.catalogs_checked, stdout);
            }
        }
        CommandSummary::Stats(summary) => {
            if summary.json {
                print_stats_json(&summary.catalogs, stdout);
                report_to(&result.issues, &mut io::stderr().lock());
            } else {
                print_stats_table(&summary.catalogs, stdout);
                report_to(&result.issues, stdout);
            }
        }
        CommandSummary::Update(summary) => {
            report_to(&result.issues, stdout);
            print_update(summary, stdout);
        }
        CommandSummary::Clean(summary) => {
            report_to(&result.issues, stdout);
            print_clean(summary, stdout);
        }
        CommandSummary::Init(summary) => print_init(summary, stdout),
    }
}

// ============================================================
// Command Summaries
// ============================================================

const STATS_HEADERS: [&str; 7] = [
    "Catalog",
    "Language",
    "Finished",
    "Unfinished",
    "Vanished",
    "Obsolete",
    "Done",
];

/// Print an aligned progress table, one row per catalog.
pub fn print_stats_table<W: Write>(catalogs: &[CatalogStats], writer: &mut W) {
    let rows: Vec<[String; 7]> = catalogs
        .iter()
        .map(|s| {
            [
                s.file_path.clone(),
                s.language.clone().unwrap_or_else(|| "-".to_string()),
                s.finished.to_string(),
                s.unfinished.to_string(),
                s.vanished.to_string(),
                s.obsolete.to_string(),
                format!("{:.1}%", s.completion()),
            ]
        })
        .collect();

    let mut widths = STATS_HEADERS.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let header: Vec<String> = STATS_HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i], i < 2))
        .collect();
    let _ = writeln!(writer, "{}", header.join("  ").trim_end().bold());

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(cell, widths[i], i < 2))
            .collect();
        let _ = writeln!(writer, "{}", cells.join("  ").trim_end());
    }
}

/// Pad to a display width; text columns align left, numbers right.
fn pad(text: &str, width: usize, left: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if left {
        format!("{}{}", text, fill)
    } else {
        format!("{}{}", fill, text)
    }
}

pub fn print_stats_json<W: Write>(catalogs: &[CatalogStats], writer: &mut W) {
    let entries: Vec<serde_json::Value> = catalogs
        .iter()
        .map(|s| {
            let mut value = json!(s);
            value["completion"] = json!((s.completion() * 10.0).round() / 10.0);
            value
        })
        .collect();
    if let Ok(text) = serde_json::to_string_pretty(&entries) {
        let _ = writeln!(writer, "{}", text);
    }
}

fn print_update<W: Write>(summary: &UpdateSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Extracted {} string(s) from {} source file(s)",
        summary.extracted_count, summary.source_files
    );

    for update in &summary.catalogs {
        let stats = &update.stats;
        let _ = writeln!(writer, "{}", update.file_path.bold());
        let _ = writeln!(
            writer,
            "  Found {} source text(s) ({} new and {} already existing)",
            stats.found, stats.new, stats.existing
        );
        if stats.same_text > 0 {
            let _ = writeln!(
                writer,
                "  Same-text heuristic provided {} translation(s)",
                stats.same_text
            );
        }
        if stats.revived > 0 {
            let _ = writeln!(writer, "  Revived {} retired entr(y/ies)", stats.revived);
        }
        if stats.obsoleted > 0 {
            let _ = writeln!(writer, "  Retired {} entr(y/ies)", stats.obsoleted);
        }
        if stats.removed > 0 {
            let _ = writeln!(writer, "  Removed {} entr(y/ies)", stats.removed);
        }
    }

    let changed: Vec<_> = summary.catalogs.iter().filter(|c| c.changed).collect();
    let created = changed.iter().filter(|c| c.created).count();
    if changed.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "All catalogs are up to date".green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} catalog(s) ({} created).",
            "Updated".green().bold(),
            changed.len(),
            created
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} catalog(s) ({} created).",
            "Would update".yellow().bold(),
            changed.len(),
            created
        );
        let _ = writeln!(writer, "Run with {} to write these catalogs.", "--apply".cyan());
    }
}

fn print_clean<W: Write>(summary: &CleanSummary, writer: &mut W) {
    if !summary.is_apply {
        for entry in &summary.entries {
            let ctx = &entry.context;
            let _ = writeln!(
                writer,
                "  {} {}:{}  {} \"{}\" ({})",
                "-".red(),
                ctx.file_path(),
                ctx.line(),
                ctx.context.dimmed(),
                ctx.source,
                entry.status
            );
        }
    }

    if summary.removed_count == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No vanished or obsolete entries".green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} entr(y/ies) in {} catalog(s).",
            "Removed".green().bold(),
            summary.removed_count,
            summary.file_count
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} entr(y/ies) in {} catalog(s).",
            "Would remove".yellow().bold(),
            summary.removed_count,
            summary.file_count
        );
        let _ = writeln!(writer, "Run with {} to remove these entries.", "--apply".cyan());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    }
}

// ============================================================
// Tests
// ============================================================
