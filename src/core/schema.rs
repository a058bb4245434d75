//! Tag registry and per-record schema validation.
//!
//! The registry is the fixed set of tag names the toolchain understands.
//! Validation never fails: every rule violation becomes an issue and the
//! scan moves on. Cross-record checks (dangling dependencies) live in the
//! graph builder, not here.

use crate::config::Config;
use crate::core::record::MetadataRecord;
use crate::issues::{IssueKind, ValidationIssue};
use crate::utils::is_hex_hash;

/// Schema/tool version reported by `--version` and the JSON export.
pub const ACD_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const TAG_PHASE: &str = "AI_PHASE";
pub const TAG_STATUS: &str = "AI_STATUS";
pub const TAG_COMPLEXITY: &str = "AI_COMPLEXITY";
pub const TAG_NOTE: &str = "AI_NOTE";
pub const TAG_DEPENDENCIES: &str = "AI_DEPENDENCIES";
pub const TAG_COMMIT: &str = "AI_COMMIT";
pub const TAG_COMMIT_HISTORY: &str = "AI_COMMIT_HISTORY";

/// All registered tag names. Unregistered names are still accepted and
/// preserved; this set only drives typed coercion and documentation.
pub const REGISTERED_TAGS: &[&str] = &[
    TAG_PHASE,
    TAG_STATUS,
    TAG_COMPLEXITY,
    TAG_NOTE,
    TAG_DEPENDENCIES,
    TAG_COMMIT,
    TAG_COMMIT_HISTORY,
    "AI_PATTERN",
    "AI_STRATEGY",
    "AI_VERSION",
    "AI_CHANGE",
    "AI_TRAIN_HASH",
    "AI_CONTEXT",
    "AI_METADATA",
    "SOURCE_API_REF",
    "TARGET_API_REF",
    "COMPILER_ERR",
    "RUNTIME_ERR",
    "FIX_REASON",
    "HUMAN_OVERRIDE",
    "AI_ASSIGNED_TO",
    "AI_TIMEOUT",
    "AI_MAX_RETRIES",
];

/// Tags whose values coerce to integers when they parse.
pub const INTEGER_TAGS: &[&str] = &["AI_TIMEOUT", "AI_MAX_RETRIES"];

/// Tags whose values are parsed as structured JSON when possible.
pub const STRUCTURED_TAGS: &[&str] = &["AI_CONTEXT", "AI_METADATA"];

/// Tags whose absence earns a warning.
pub const RECOMMENDED_TAGS: &[&str] = &[TAG_COMPLEXITY, TAG_NOTE, TAG_DEPENDENCIES, TAG_COMMIT];

/// Validate one record against the schema carried by the scan config.
///
/// Returns all issues found; never fails. The required-tag list and enum
/// value sets come from the config so a scan can tighten or relax them
/// without touching process-wide state.
pub fn validate_record(record: &MetadataRecord, config: &Config) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let phase = record.phase.clone();

    let mut push = |issue: ValidationIssue| issues.push(issue.with_phase(phase.clone()));

    for tag in &config.required_tags {
        if !record.has_tag(tag) {
            push(ValidationIssue::error(
                IssueKind::MissingTag,
                &record.file,
                record.line,
                format!("Missing required tag: {}", tag),
            ));
        }
    }

    if let Some(status) = &record.status
        && !config.status_values.contains(status)
    {
        push(ValidationIssue::error(
            IssueKind::InvalidStatus,
            &record.file,
            record.line,
            format!("Invalid AI_STATUS value: {}", status),
        ));
    }

    if let Some(complexity) = &record.complexity
        && !config.complexity_values.contains(complexity)
    {
        push(ValidationIssue::error(
            IssueKind::InvalidComplexity,
            &record.file,
            record.line,
            format!("Invalid AI_COMPLEXITY value: {}", complexity),
        ));
    }

    for tag in RECOMMENDED_TAGS {
        if !record.has_tag(tag) {
            push(ValidationIssue::warning(
                IssueKind::RecommendedTag,
                &record.file,
                record.line,
                format!("Missing recommended tag: {}", tag),
            ));
        }
    }

    // Commit format is lenient: the convention tolerates placeholder values
    // like "initial", so a malformed hash is only worth a warning.
    if let Some(commit) = &record.commit
        && !is_hex_hash(commit)
    {
        push(ValidationIssue::warning(
            IssueKind::CommitFormat,
            &record.file,
            record.line,
            format!("AI_COMMIT does not look like a commit hash: {}", commit),
        ));
    }

    if let Some(history) = &record.commit_history {
        if let Some(commit) = &record.commit
            && history.contains(commit)
        {
            push(ValidationIssue::error(
                IssueKind::CommitInHistory,
                &record.file,
                record.line,
                format!("Current commit duplicated in history: {}", commit),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for entry in history {
            if !seen.insert(entry) {
                push(ValidationIssue::error(
                    IssueKind::DuplicateHistory,
                    &record.file,
                    record.line,
                    format!("Duplicate commit in AI_COMMIT_HISTORY: {}", entry),
                ));
            }
            if !is_hex_hash(entry) {
                push(ValidationIssue::warning(
                    IssueKind::CommitFormat,
                    &record.file,
                    record.line,
                    format!("AI_COMMIT_HISTORY entry does not look like a commit hash: {}", entry),
                ));
            }
        }
    }

    issues
}
