//! Report serializers.
//!
//! Each format renders from the same immutable [`ScanReport`]. A failed
//! write is an `error` issue for that export alone; the in-memory report
//! and the remaining exports are unaffected.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::report::ScanReport;
use crate::issues::{IssueKind, ValidationIssue};

pub mod csv;
pub mod dot;
pub mod json;
pub mod markdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
    Dot,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Markdown => write!(f, "Markdown"),
            ExportFormat::Dot => write!(f, "DOT"),
        }
    }
}

/// One requested export: a format and where to write it.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub format: ExportFormat,
    pub path: PathBuf,
}

/// Outcome of writing the requested exports.
pub struct ExportOutcome {
    /// Exports that landed on disk.
    pub written: Vec<ExportTarget>,
    /// One `error` issue per export that failed.
    pub issues: Vec<ValidationIssue>,
}

/// Write every requested export, collecting failures instead of aborting.
pub fn write_exports(report: &ScanReport, targets: &[ExportTarget]) -> ExportOutcome {
    let mut written = Vec::new();
    let mut issues = Vec::new();

    for target in targets {
        match write_one(report, target) {
            Ok(()) => written.push(target.clone()),
            Err(err) => issues.push(ValidationIssue::error(
                IssueKind::ExportFailed,
                target.path.to_string_lossy(),
                0,
                format!("Failed to write {} export: {:#}", target.format, err),
            )),
        }
    }

    ExportOutcome { written, issues }
}

fn write_one(report: &ScanReport, target: &ExportTarget) -> Result<()> {
    let content = match target.format {
        ExportFormat::Json => json::render(report)?,
        ExportFormat::Csv => csv::render(report),
        ExportFormat::Markdown => markdown::render(report),
        ExportFormat::Dot => dot::render(report),
    };
    write_file(&target.path, content)
}

fn write_file(path: &Path, mut content: String) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    if !content.ends_with('\n') {
        content.push('\n');
    }

    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
