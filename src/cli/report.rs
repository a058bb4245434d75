//! Report formatting and printing utilities.
//!
//! This module displays issues in cargo-style format and renders the
//! per-command summaries. Separate from core logic so acd can be used as a
//! library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    AnalyzeSummary, CommandResult, CommandSummary, ExportSummary, InitSummary, ValidateSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Severity, ValidationIssue};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Validate(summary) => print_validate(summary, result, verbose),
        CommandSummary::Export(summary) => print_export(summary, result),
        CommandSummary::Analyze(summary) => print_analyze(summary, result),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[ValidationIssue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[ValidationIssue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = issues
        .iter()
        .map(|issue| issue.line)
        .max()
        .map(|line| line.to_string().len())
        .unwrap_or(1);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_problem_summary(issues, writer);
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &ValidationIssue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message,
        issue.kind.to_string().dimmed().cyan()
    );

    // Graph-scoped issues attach to a phase, not a file location.
    if issue.is_graph_scoped() {
        if let Some(phase) = &issue.phase {
            let _ = writeln!(writer, "  {} phase: {}", "-->".blue(), phase);
        }
    } else {
        let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), issue.file, issue.line);
    }

    if let Some(source_line) = &issue.source_line {
        let caret_char = match issue.severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };
        let caret_width = UnicodeWidthStr::width(source_line.as_str()).max(1);

        let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            issue.line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            "",
            "|".blue(),
            caret_char.to_string().repeat(caret_width),
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_problem_summary<W: Write>(issues: &[ValidationIssue], writer: &mut W) {
    let total_errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let total_warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 { "warning" } else { "warnings" }.yellow()
        );
    }
}

fn print_validate(summary: &ValidateSummary, result: &CommandResult, verbose: bool) {
    report(&result.issues);

    if result.issues.is_empty() {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {}, {} metadata {} - no issues found",
                result.files_processed,
                if result.files_processed == 1 { "file" } else { "files" },
                summary.records_found,
                if summary.records_found == 1 { "block" } else { "blocks" },
            )
            .green()
        );
    }

    println!(
        "Scanned {} file(s): {} metadata block(s) in {} phase(s) across {} file(s), coverage {:.1}%",
        result.files_processed,
        summary.records_found,
        summary.phase_count,
        summary.files_with_metadata,
        summary.coverage * 100.0
    );

    if verbose {
        print_distribution("Phase Distribution", &summary.phase_distribution);
        print_distribution("Status Distribution", &summary.status_distribution);
    }

    if let Some(path) = &summary.exported {
        println!("Exported JSON to: {}", path.display());
    }
}

fn print_export(summary: &ExportSummary, result: &CommandResult) {
    report(&result.issues);

    println!(
        "Extracted {} metadata block(s) from {} file(s) ({} phase(s))",
        summary.records_found, result.files_processed, summary.phase_count
    );
    for (format, path) in &summary.written {
        println!("Exported {} to: {}", format, path.display());
    }
}

fn print_analyze(summary: &AnalyzeSummary, result: &CommandResult) {
    println!("Implementation Status Analysis");
    println!("({} metadata blocks from {} files)", summary.records_found, result.files_processed);

    print_distribution("Status Distribution", &summary.status_distribution);
    print_distribution("Complexity Distribution", &summary.complexity_distribution);

    let analysis = &summary.analysis;
    if !analysis.high_risk_incomplete.is_empty() {
        println!("\n{}", "High-Risk Incomplete Implementations:".bold().red());
        for item in &analysis.high_risk_incomplete {
            println!(
                "  - {} ({}:{}) - {}, {}",
                item.phase, item.file, item.line, item.status, item.complexity
            );
        }
    }

    if !analysis.critical_implemented.is_empty() {
        println!("\n{}", "Critical Implemented Phases:".bold().green());
        for phase in &analysis.critical_implemented {
            println!("  - {}", phase);
        }
    }

    if !analysis.deprecated_phases.is_empty() {
        println!("\n{}", "Deprecated Phases:".bold().yellow());
        for phase in &analysis.deprecated_phases {
            println!("  - {}", phase);
        }
    }

    if !analysis.missing_dependencies.is_empty() {
        println!("\n{}", "Missing Dependencies:".bold().yellow());
        for (phase, deps) in &analysis.missing_dependencies {
            println!("  - {} requires: {}", phase, deps.join(", "));
        }
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn print_distribution(title: &str, distribution: &std::collections::BTreeMap<String, usize>) {
    if distribution.is_empty() {
        return;
    }
    println!("\n{}:", title);
    for (key, count) in distribution {
        println!("  {}: {}", key, count);
    }
}

// ============================================================
// Tests
// ============================================================
