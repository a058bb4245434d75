use super::{CommandResult, CommandSummary};
use crate::issues::{Severity, ValidationIssue};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<ValidationIssue>,
    files_processed: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let error_count = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();

    CommandResult {
        summary,
        error_count,
        exit_on_errors,
        issues,
        files_processed,
    }
}
