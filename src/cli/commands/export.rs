use anyhow::Result;

use super::super::args::ExportCommand;
use super::{
    helper::finish,
    {CommandResult, CommandSummary, ExportSummary},
};
use crate::core::ScanContext;
use crate::export::{ExportFormat, ExportTarget, write_exports};

pub fn export(cmd: ExportCommand) -> Result<CommandResult> {
    let mut targets = Vec::new();
    for (format, path) in [
        (ExportFormat::Json, &cmd.json),
        (ExportFormat::Csv, &cmd.csv),
        (ExportFormat::Markdown, &cmd.markdown),
        (ExportFormat::Dot, &cmd.dot),
    ] {
        if let Some(path) = path {
            targets.push(ExportTarget {
                format,
                path: path.clone(),
            });
        }
    }

    if targets.is_empty() {
        anyhow::bail!("No export format requested. Use --json, --csv, --markdown, or --dot.");
    }

    let ctx = ScanContext::new(&cmd.path, cmd.common.verbose)?;
    let report = ctx.scan(cmd.common.repository.clone());

    let mut issues = report.issues.clone();
    let outcome = write_exports(&report, &targets);
    issues.extend(outcome.issues);

    let summary = ExportSummary {
        records_found: report.records_found(),
        phase_count: report.phase_distribution().len(),
        written: outcome
            .written
            .into_iter()
            .map(|target| (target.format.to_string(), target.path))
            .collect(),
    };

    Ok(finish(
        CommandSummary::Export(summary),
        issues,
        report.files_processed,
        true,
    ))
}
