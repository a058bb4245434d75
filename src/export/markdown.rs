//! Markdown export.
//!
//! Human-readable summary: scan statistics, phase distribution with the
//! per-block details, the dependency list, issues grouped by severity, and
//! per-file block counts.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::core::record::MetadataRecord;
use crate::core::report::ScanReport;
use crate::issues::Severity;

pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# ACD Metadata Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {}", report.timestamp_utc);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Total files processed: {}", report.files_processed);
    let _ = writeln!(out, "- Files with ACD metadata: {}", report.files_with_metadata);
    let _ = writeln!(out, "- Total metadata blocks: {}", report.records_found());
    let _ = writeln!(out, "- Unique phases: {}", report.phase_distribution().len());
    let _ = writeln!(out, "- Coverage: {:.1}%", report.coverage() * 100.0);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Phase Distribution");
    let _ = writeln!(out);
    let by_phase = records_by_phase(report);
    for (phase, records) in &by_phase {
        let _ = writeln!(out, "### {} ({} blocks)", phase, records.len());
        let _ = writeln!(out);
        for record in records {
            let name = Path::new(&record.file)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| record.file.clone());
            let _ = writeln!(out, "- **{}:{}**", name, record.line);
            let _ = writeln!(out, "  - Status: {}", record.status_or_unknown());
            if let Some(complexity) = &record.complexity {
                let _ = writeln!(out, "  - Complexity: {}", complexity);
            }
            if let Some(note) = &record.note {
                let _ = writeln!(out, "  - Note: {}", note);
            }
            let _ = writeln!(out);
        }
    }

    let with_deps: Vec<_> = report
        .phases
        .values()
        .filter(|node| !node.declared_dependencies.is_empty())
        .collect();
    if !with_deps.is_empty() {
        let _ = writeln!(out, "## Dependency Graph");
        let _ = writeln!(out);
        for node in with_deps {
            let deps: Vec<&str> = node.declared_dependencies.iter().map(String::as_str).collect();
            let _ = writeln!(out, "- **{}** depends on: {}", node.name, deps.join(", "));
        }
        let _ = writeln!(out);
    }

    if !report.issues.is_empty() {
        let _ = writeln!(out, "## Issues");
        let _ = writeln!(out);
        for (severity, title) in [(Severity::Error, "Errors"), (Severity::Warning, "Warnings")] {
            let group: Vec<_> = report
                .issues
                .iter()
                .filter(|issue| issue.severity == severity)
                .collect();
            if group.is_empty() {
                continue;
            }
            let _ = writeln!(out, "### {} ({})", title, group.len());
            let _ = writeln!(out);
            for issue in group {
                if issue.is_graph_scoped() {
                    let _ = writeln!(out, "- {}", issue.message);
                } else {
                    let _ = writeln!(out, "- `{}:{}` {}", issue.file, issue.line, issue.message);
                }
            }
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(out, "## Files");
    let _ = writeln!(out);
    let mut by_file: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &report.records {
        *by_file.entry(record.file.as_str()).or_insert(0) += 1;
    }
    for (file, count) in by_file {
        let _ = writeln!(out, "### {}", file);
        let _ = writeln!(out);
        let _ = writeln!(out, "{} metadata block(s)", count);
        let _ = writeln!(out);
    }

    out
}

fn records_by_phase(report: &ScanReport) -> BTreeMap<&str, Vec<&MetadataRecord>> {
    let mut by_phase: BTreeMap<&str, Vec<&MetadataRecord>> = BTreeMap::new();
    for record in &report.records {
        by_phase.entry(record.phase_or_unknown()).or_default().push(record);
    }
    by_phase
}

#[cfg(test)]
mod tests {
    use crate::core::graph::DependencyGraph;
    use crate::core::record::MetadataRecord;
    use crate::core::report::ScanReport;
    use crate::export::markdown::render;
    use crate::issues::{IssueKind, ValidationIssue};

    #[test]
    fn test_sections_present() {
        let mut record = MetadataRecord::new("./src/mem.c", 7);
        record.phase = Some("MEMORY".into());
        record.status = Some("IMPLEMENTED".into());
        record.complexity = Some("HIGH".into());
        record.note = Some("Unified allocation".into());
        record.dependencies = Some(vec!["INIT".into()]);

        let records = vec![record];
        let issues = vec![
            ValidationIssue::error(IssueKind::MissingTag, "./src/other.c", 2, "Missing required tag: AI_STATUS"),
            ValidationIssue::warning(IssueKind::RecommendedTag, "./src/mem.c", 7, "Missing recommended tag: AI_COMMIT"),
        ];
        let graph = DependencyGraph::build(&records, &["INIT".into()]);
        let report = ScanReport::build(3, records, issues, &graph, None);

        let rendered = render(&report);
        assert!(rendered.contains("# ACD Metadata Report"));
        assert!(rendered.contains("- Total files processed: 3"));
        assert!(rendered.contains("### MEMORY (1 blocks)"));
        assert!(rendered.contains("- **mem.c:7**"));
        assert!(rendered.contains("  - Complexity: HIGH"));
        assert!(rendered.contains("**MEMORY** depends on: INIT"));
        assert!(rendered.contains("### Errors (1)"));
        assert!(rendered.contains("### Warnings (1)"));
        assert!(rendered.contains("`./src/other.c:2` Missing required tag: AI_STATUS"));
        assert!(rendered.contains("### ./src/mem.c"));
    }

    #[test]
    fn test_no_issue_section_when_clean() {
        let mut record = MetadataRecord::new("./a.c", 1);
        record.phase = Some("A".into());
        record.status = Some("FIXED".into());
        let records = vec![record];
        let graph = DependencyGraph::build(&records, &[]);
        let report = ScanReport::build(1, records, Vec::new(), &graph, None);

        let rendered = render(&report);
        assert!(!rendered.contains("## Issues"));
    }
}
