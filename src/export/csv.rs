//! CSV export.
//!
//! One row per record, flattened: list-valued tags are semicolon-joined so
//! the comma stays a column separator.

use crate::core::record::MetadataRecord;
use crate::core::report::ScanReport;

const HEADER: &str = "File,Line,Phase,Status,Complexity,Note,Dependencies,Commit,Source_API,Target_API";

pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for record in &report.records {
        let row = [
            record.file.clone(),
            record.line.to_string(),
            field(&record.phase),
            field(&record.status),
            field(&record.complexity),
            field(&record.note),
            joined(&record.dependencies),
            field(&record.commit),
            extra_text(record, "SOURCE_API_REF"),
            extra_text(record, "TARGET_API_REF"),
        ];
        let quoted: Vec<String> = row.iter().map(|cell| quote(cell)).collect();
        out.push_str(&quoted.join(","));
        out.push('\n');
    }

    out
}

fn field(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn joined(list: &Option<Vec<String>>) -> String {
    list.as_deref().unwrap_or_default().join(";")
}

fn extra_text(record: &MetadataRecord, name: &str) -> String {
    record
        .extra
        .iter()
        .find(|(tag, _)| tag == name)
        .and_then(|(_, value)| value.as_text())
        .unwrap_or_default()
        .to_string()
}

/// Minimal CSV quoting: only cells containing a comma, quote, or newline are
/// wrapped, with interior quotes doubled.
fn quote(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
