use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::report::StatusAnalysis;
use crate::issues::ValidationIssue;

#[derive(Debug)]
pub enum CommandSummary {
    Validate(ValidateSummary),
    Export(ExportSummary),
    Analyze(Box<AnalyzeSummary>),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ValidateSummary {
    pub files_with_metadata: usize,
    pub records_found: usize,
    pub phase_count: usize,
    pub coverage: f64,
    pub phase_distribution: BTreeMap<String, usize>,
    pub status_distribution: BTreeMap<String, usize>,
    /// JSON export path, when `--export` was requested and the write landed.
    pub exported: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ExportSummary {
    pub records_found: usize,
    pub phase_count: usize,
    /// (format name, path) per export that landed.
    pub written: Vec<(String, PathBuf)>,
}

#[derive(Debug)]
pub struct AnalyzeSummary {
    pub records_found: usize,
    pub status_distribution: BTreeMap<String, usize>,
    pub complexity_distribution: BTreeMap<String, usize>,
    pub analysis: StatusAnalysis,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running acd commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// All issues found during the scan.
    /// Empty for non-scanning commands.
    pub issues: Vec<ValidationIssue>,
    /// Number of files scanned with a matching extension.
    pub files_processed: usize,
}
