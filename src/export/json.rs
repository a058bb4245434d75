//! JSON export.
//!
//! The envelope machine consumers read: a `metadata` header with schema
//! version and counts, the full record array under `acd_metadata`, and the
//! issue arrays split by severity. List-valued tags are arrays here, never
//! comma-joined strings.

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

use crate::core::report::ScanReport;
use crate::core::schema::ACD_VERSION;
use crate::issues::{Severity, ValidationIssue};

pub fn render(report: &ScanReport) -> Result<String> {
    let mut metadata = Map::new();
    metadata.insert("acd_schema_version".into(), json!(ACD_VERSION));
    metadata.insert("files_processed".into(), json!(report.files_processed));
    metadata.insert("acd_metadata_found".into(), json!(report.records_found()));
    metadata.insert("errors".into(), json!(report.error_count()));
    metadata.insert("warnings".into(), json!(report.warning_count()));
    metadata.insert("timestamp_utc".into(), json!(report.timestamp_utc));
    metadata.insert("phase_distribution".into(), json!(report.phase_distribution()));
    metadata.insert("status_distribution".into(), json!(report.status_distribution()));

    let records: Vec<Value> = report
        .records
        .iter()
        .map(|record| record.to_json(report.repository.as_deref(), &report.timestamp_utc))
        .collect();

    let errors: Vec<Value> = report
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .map(issue_json)
        .collect();
    let warnings: Vec<Value> = report
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Warning)
        .map(issue_json)
        .collect();

    let envelope = json!({
        "metadata": metadata,
        "acd_metadata": records,
        "errors": errors,
        "warnings": warnings,
    });

    serde_json::to_string_pretty(&envelope).context("Failed to serialize JSON report")
}

fn issue_json(issue: &ValidationIssue) -> Value {
    let mut map = Map::new();
    map.insert("file".into(), json!(issue.file));
    map.insert("line".into(), json!(issue.line));
    map.insert("message".into(), json!(issue.message));
    map.insert("severity".into(), json!(issue.severity.to_string()));
    if let Some(phase) = &issue.phase {
        map.insert("phase".into(), json!(phase));
    }
    Value::Object(map)
}
