//! Issue types for metadata validation results.
//!
//! Every problem the scan finds - parse errors, schema violations, graph
//! anomalies, unreadable files - becomes a [`ValidationIssue`] in the final
//! report. Issues never abort the scan; they are collected, sorted, and
//! rendered by the reporter and the exporters.

// ============================================================
// Severity and Kind
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Kind identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueKind {
    /// Metadata block with no attached code declaration.
    NoDeclaration,
    /// Continuation line before any tag in a block.
    OrphanContinuation,
    /// Same tag appears twice in one block.
    DuplicateTag,
    /// Required tag absent.
    MissingTag,
    /// `AI_STATUS` value outside the status enum.
    InvalidStatus,
    /// `AI_COMPLEXITY` value outside the complexity enum.
    InvalidComplexity,
    /// Recommended tag absent.
    RecommendedTag,
    /// Commit value does not look like a hex hash.
    CommitFormat,
    /// Current commit duplicated inside the commit history.
    CommitInHistory,
    /// Duplicate entry within the commit history.
    DuplicateHistory,
    /// Phase referenced as a dependency but never declared.
    DanglingDependency,
    /// Cycle in the phase-dependency graph.
    DependencyCycle,
    /// File could not be read.
    Io,
    /// A requested export could not be written.
    ExportFailed,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::NoDeclaration => write!(f, "no-declaration"),
            IssueKind::OrphanContinuation => write!(f, "orphan-continuation"),
            IssueKind::DuplicateTag => write!(f, "duplicate-tag"),
            IssueKind::MissingTag => write!(f, "missing-tag"),
            IssueKind::InvalidStatus => write!(f, "invalid-status"),
            IssueKind::InvalidComplexity => write!(f, "invalid-complexity"),
            IssueKind::RecommendedTag => write!(f, "recommended-tag"),
            IssueKind::CommitFormat => write!(f, "commit-format"),
            IssueKind::CommitInHistory => write!(f, "commit-in-history"),
            IssueKind::DuplicateHistory => write!(f, "duplicate-history"),
            IssueKind::DanglingDependency => write!(f, "dangling-dependency"),
            IssueKind::DependencyCycle => write!(f, "dependency-cycle"),
            IssueKind::Io => write!(f, "io-error"),
            IssueKind::ExportFailed => write!(f, "export-failed"),
        }
    }
}

// ============================================================
// ValidationIssue
// ============================================================

/// One problem found in one record, one file, or the repo-wide graph.
///
/// File-scoped issues carry the offending location. Graph-scoped issues
/// (dangling dependencies, cycles) attach to a phase instead: their `file`
/// is empty and `line` is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub file: String,
    pub line: usize,
    pub message: String,
    /// Phase of the offending record, or the phase a graph issue attaches to.
    pub phase: Option<String>,
    /// Raw source line for context display, when one exists.
    pub source_line: Option<String>,
}

impl ValidationIssue {
    pub fn error(kind: IssueKind, file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            file: file.into(),
            line,
            message: message.into(),
            phase: None,
            source_line: None,
        }
    }

    pub fn warning(kind: IssueKind, file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            file: file.into(),
            line,
            message: message.into(),
            phase: None,
            source_line: None,
        }
    }

    /// Graph-scoped issue: attaches to a phase, not a file location.
    pub fn graph(severity: Severity, kind: IssueKind, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            file: String::new(),
            line: 0,
            message: message.into(),
            phase: Some(phase.into()),
            source_line: None,
        }
    }

    pub fn with_phase(mut self, phase: Option<String>) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_source_line(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// True for issues that attach to a phase rather than a file location.
    pub fn is_graph_scoped(&self) -> bool {
        self.file.is_empty()
    }
}

// ============================================================
// Ordering (for deterministic reports)
// ============================================================

impl Ord for ValidationIssue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // File-scoped issues sort by (file, line, message); graph-scoped
        // issues come last, sorted by phase name.
        match (self.is_graph_scoped(), other.is_graph_scoped()) {
            (false, false) => self
                .file
                .cmp(&other.file)
                .then_with(|| self.line.cmp(&other.line))
                .then_with(|| self.message.cmp(&other.message)),
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => self
                .phase
                .cmp(&other.phase)
                .then_with(|| self.message.cmp(&other.message)),
        }
    }
}

impl PartialOrd for ValidationIssue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
