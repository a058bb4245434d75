use anyhow::Result;

use super::super::args::ValidateCommand;
use super::{
    helper::finish,
    {CommandResult, CommandSummary, ValidateSummary},
};
use crate::core::ScanContext;
use crate::export::{ExportFormat, ExportTarget, write_exports};

pub fn validate(cmd: ValidateCommand) -> Result<CommandResult> {
    let ctx = ScanContext::new(&cmd.path, cmd.common.verbose)?;
    let report = ctx.scan(cmd.common.repository.clone());

    let mut issues = report.issues.clone();
    let mut exported = None;

    if let Some(path) = &cmd.export {
        let targets = [ExportTarget {
            format: ExportFormat::Json,
            path: path.clone(),
        }];
        let outcome = write_exports(&report, &targets);
        issues.extend(outcome.issues);
        exported = outcome.written.first().map(|target| target.path.clone());
    }

    let summary = ValidateSummary {
        files_with_metadata: report.files_with_metadata,
        records_found: report.records_found(),
        phase_count: report.phase_distribution().len(),
        coverage: report.coverage(),
        phase_distribution: report.phase_distribution(),
        status_distribution: report.status_distribution(),
        exported,
    };

    Ok(finish(
        CommandSummary::Validate(summary),
        issues,
        report.files_processed,
        true,
    ))
}
