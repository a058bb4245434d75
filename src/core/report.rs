//! Aggregated scan results.
//!
//! [`ScanReport`] is the single immutable artifact a scan produces: all
//! records and issues in deterministic order, the per-phase aggregate view,
//! and the counters the exporters and the CLI summary read. Record and issue
//! ordering is a pure function of (file path, line number) - it never
//! depends on filesystem iteration order or worker scheduling.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::graph::DependencyGraph;
use crate::core::record::{Complexity, MetadataRecord, Status};
use crate::issues::{Severity, ValidationIssue};

/// Aggregate view of one phase across the whole scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseNode {
    pub name: String,
    /// Number of records declaring this phase.
    pub member_count: usize,
    pub status_distribution: BTreeMap<String, usize>,
    pub complexity_distribution: BTreeMap<String, usize>,
    /// Union of all dependencies declared by any member record.
    pub declared_dependencies: BTreeSet<String>,
    /// True when the phase is only ever referenced as a dependency.
    pub dangling: bool,
}

impl PhaseNode {
    fn new(name: &str, dangling: bool) -> Self {
        Self {
            name: name.to_string(),
            member_count: 0,
            status_distribution: BTreeMap::new(),
            complexity_distribution: BTreeMap::new(),
            declared_dependencies: BTreeSet::new(),
            dangling,
        }
    }

    /// Status with the most member records, for graph coloring.
    pub fn predominant_status(&self) -> Option<&str> {
        self.status_distribution
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(status, _)| status.as_str())
    }
}

/// The top-level aggregate result of one scan invocation.
#[derive(Debug)]
pub struct ScanReport {
    /// Files scanned with a matching extension.
    pub files_processed: usize,
    /// Files contributing at least one record.
    pub files_with_metadata: usize,
    /// All records, sorted by (file path, line).
    pub records: Vec<MetadataRecord>,
    /// All issues: file-scoped sorted by (file, line), then graph-scoped
    /// sorted by phase name.
    pub issues: Vec<ValidationIssue>,
    /// Phase name -> aggregate node, including dangling phases.
    pub phases: BTreeMap<String, PhaseNode>,
    pub repository: Option<String>,
    pub timestamp_utc: String,
}

impl ScanReport {
    /// Assemble the report from aggregated per-file results. Sorting and
    /// the phase map are computed here, once, after the parallel phase.
    pub fn build(
        files_processed: usize,
        mut records: Vec<MetadataRecord>,
        mut issues: Vec<ValidationIssue>,
        graph: &DependencyGraph,
        repository: Option<String>,
    ) -> Self {
        records.sort_by(|a, b| a.file.cmp(&b.file).then_with(|| a.line.cmp(&b.line)));
        issues.sort();

        let files_with_metadata = records
            .iter()
            .map(|r| r.file.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let mut phases: BTreeMap<String, PhaseNode> = BTreeMap::new();
        for phase in graph.phases() {
            phases.insert(phase.to_string(), PhaseNode::new(phase, graph.is_dangling(phase)));
        }
        for record in &records {
            let node = phases
                .entry(record.phase_or_unknown().to_string())
                .or_insert_with(|| PhaseNode::new(record.phase_or_unknown(), false));
            node.member_count += 1;
            *node
                .status_distribution
                .entry(record.status_or_unknown().to_string())
                .or_insert(0) += 1;
            if let Some(complexity) = &record.complexity {
                *node
                    .complexity_distribution
                    .entry(complexity.clone())
                    .or_insert(0) += 1;
            }
            if let Some(deps) = &record.dependencies {
                node.declared_dependencies.extend(deps.iter().cloned());
            }
        }

        Self {
            files_processed,
            files_with_metadata,
            records,
            issues,
            phases,
            repository,
            timestamp_utc: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn records_found(&self) -> usize {
        self.records.len()
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Warning).count()
    }

    /// Fraction of scanned files containing at least one tag block.
    pub fn coverage(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.files_with_metadata as f64 / self.files_processed as f64
        }
    }

    /// Repo-wide phase distribution (record counts per phase).
    pub fn phase_distribution(&self) -> BTreeMap<String, usize> {
        self.phases
            .values()
            .filter(|node| node.member_count > 0)
            .map(|node| (node.name.clone(), node.member_count))
            .collect()
    }

    /// Repo-wide status distribution.
    pub fn status_distribution(&self) -> BTreeMap<String, usize> {
        let mut distribution = BTreeMap::new();
        for record in &self.records {
            *distribution
                .entry(record.status_or_unknown().to_string())
                .or_insert(0) += 1;
        }
        distribution
    }

    /// Repo-wide complexity distribution.
    pub fn complexity_distribution(&self) -> BTreeMap<String, usize> {
        let mut distribution = BTreeMap::new();
        for record in &self.records {
            if let Some(complexity) = &record.complexity {
                *distribution.entry(complexity.clone()).or_insert(0) += 1;
            }
        }
        distribution
    }

    /// Nearest record at or above the given line of a file.
    ///
    /// This is the lookup a debugger integration drives: given a stopped
    /// source location, find the metadata block governing it. Returns `None`
    /// when the file has no block at or above the line.
    pub fn find_nearest(&self, file: &str, line: usize) -> Option<&MetadataRecord> {
        self.records
            .iter()
            .filter(|record| record.file == file && record.line <= line)
            .max_by_key(|record| record.line)
    }

    /// Implementation-status analysis across all records.
    pub fn analysis(&self) -> StatusAnalysis {
        let mut analysis = StatusAnalysis::default();

        for record in &self.records {
            let status = record.parsed_status();
            let complexity = record.parsed_complexity();

            let high_risk = matches!(complexity, Some(Complexity::High | Complexity::Critical))
                && matches!(status, Some(Status::Partial | Status::NotStarted));
            if high_risk {
                analysis.high_risk_incomplete.push(HighRiskItem {
                    phase: record.phase_or_unknown().to_string(),
                    file: record.file.clone(),
                    line: record.line,
                    status: record.status_or_unknown().to_string(),
                    complexity: record.complexity.clone().unwrap_or_default(),
                });
            }

            if complexity == Some(Complexity::Critical) && status == Some(Status::Implemented) {
                analysis
                    .critical_implemented
                    .insert(record.phase_or_unknown().to_string());
            }

            if status == Some(Status::Deprecated) {
                analysis
                    .deprecated_phases
                    .insert(record.phase_or_unknown().to_string());
            }
        }

        for (name, node) in &self.phases {
            let missing: Vec<String> = node
                .declared_dependencies
                .iter()
                .filter(|dep| self.phases.get(*dep).is_none_or(|d| d.dangling))
                .cloned()
                .collect();
            if !missing.is_empty() {
                analysis.missing_dependencies.insert(name.clone(), missing);
            }
        }

        analysis
    }
}

/// A record flagged as high risk: hard or critical work not yet finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighRiskItem {
    pub phase: String,
    pub file: String,
    pub line: usize,
    pub status: String,
    pub complexity: String,
}

/// Result of [`ScanReport::analysis`].
#[derive(Debug, Default)]
pub struct StatusAnalysis {
    pub high_risk_incomplete: Vec<HighRiskItem>,
    pub critical_implemented: BTreeSet<String>,
    pub deprecated_phases: BTreeSet<String>,
    /// Phase -> dependencies it declares that no record implements.
    pub missing_dependencies: BTreeMap<String, Vec<String>>,
}
