use anyhow::Result;

use super::super::args::AnalyzeCommand;
use super::{
    helper::finish,
    {AnalyzeSummary, CommandResult, CommandSummary},
};
use crate::core::ScanContext;

pub fn analyze(cmd: AnalyzeCommand) -> Result<CommandResult> {
    let ctx = ScanContext::new(&cmd.path, cmd.common.verbose)?;
    let report = ctx.scan(cmd.common.repository.clone());

    let summary = AnalyzeSummary {
        records_found: report.records_found(),
        status_distribution: report.status_distribution(),
        complexity_distribution: report.complexity_distribution(),
        analysis: report.analysis(),
    };

    Ok(finish(
        CommandSummary::Analyze(Box::new(summary)),
        report.issues.clone(),
        report.files_processed,
        true,
    ))
}
