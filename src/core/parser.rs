//! Tag parser.
//!
//! Turns the raw lines of a located block into a [`MetadataRecord`].
//! Registered tags coerce into the typed fields; unregistered tag names are
//! preserved verbatim in the record's extra bag, never rejected. Problems
//! (orphan continuations, duplicate tags) become issues on the block and
//! parsing continues.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::locator::RawBlock;
use crate::core::record::{MetadataRecord, TagValue};
use crate::core::schema;
use crate::issues::{IssueKind, ValidationIssue};

/// `TAG_NAME: value` - tag names are uppercase identifiers, matched
/// case-sensitively.
static TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z0-9_]*)\s*:\s*(.*)$").expect("valid tag pattern"));

/// Parse one raw block into a record plus any parse issues.
pub fn parse_block(block: &RawBlock, file: &str) -> (MetadataRecord, Vec<ValidationIssue>) {
    let mut issues = Vec::new();

    // First pass: collect (name, value, line) entries, merging continuation
    // lines into the previous tag's value with a single joining space.
    let mut entries: Vec<(String, String, usize)> = Vec::new();
    for (offset, raw) in block.lines.iter().enumerate() {
        let line_no = block.start_line + offset;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = TAG_LINE.captures(line) {
            entries.push((caps[1].to_string(), caps[2].trim().to_string(), line_no));
        } else if let Some((_, value, _)) = entries.last_mut() {
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(line);
        } else {
            issues.push(
                ValidationIssue::error(
                    IssueKind::OrphanContinuation,
                    file,
                    line_no,
                    format!("Orphan continuation line: \"{}\"", line),
                )
                .with_source_line(line),
            );
        }
    }

    // Second pass: coerce into the record; first value wins on duplicates.
    let mut record = MetadataRecord::new(file, block.start_line);
    record.decl_line = block.decl_line;

    for (name, value, line_no) in entries {
        if record.has_tag(&name) {
            issues.push(ValidationIssue::error(
                IssueKind::DuplicateTag,
                file,
                line_no,
                format!("Duplicate tag: {}", name),
            ));
            continue;
        }

        match name.as_str() {
            schema::TAG_PHASE => record.phase = non_empty(value),
            schema::TAG_STATUS => record.status = non_empty(value),
            schema::TAG_COMPLEXITY => record.complexity = non_empty(value),
            schema::TAG_NOTE => record.note = non_empty(value),
            schema::TAG_DEPENDENCIES => record.dependencies = Some(split_list(&value)),
            schema::TAG_COMMIT => record.commit = non_empty(value),
            schema::TAG_COMMIT_HISTORY => record.commit_history = Some(split_list(&value)),
            _ => {
                let coerced = coerce_extra(name_kind(&name), value);
                record.extra.push((name, coerced));
            }
        }
    }

    (record, issues)
}

/// Split a comma-separated tag value into trimmed, non-empty elements,
/// preserving order.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[derive(PartialEq)]
enum ExtraKind {
    Integer,
    Json,
    Plain,
}

fn name_kind(name: &str) -> ExtraKind {
    if schema::INTEGER_TAGS.contains(&name) {
        ExtraKind::Integer
    } else if schema::STRUCTURED_TAGS.contains(&name) {
        ExtraKind::Json
    } else {
        ExtraKind::Plain
    }
}

/// Coerce a pass-through tag value.
///
/// Integer tags become integers when they parse. Structured tags, and any
/// value that opens with `{`, are parsed as JSON after continuation merging;
/// anything unparseable stays a verbatim string.
fn coerce_extra(kind: ExtraKind, value: String) -> TagValue {
    match kind {
        ExtraKind::Integer => match value.parse::<i64>() {
            Ok(n) => TagValue::Integer(n),
            Err(_) => TagValue::Text(value),
        },
        ExtraKind::Json => match serde_json::from_str(&value) {
            Ok(parsed) => TagValue::Structured(parsed),
            Err(_) => TagValue::Text(value),
        },
        ExtraKind::Plain => {
            if value.starts_with('{') {
                match serde_json::from_str(&value) {
                    Ok(parsed) => TagValue::Structured(parsed),
                    Err(_) => TagValue::Text(value),
                }
            } else {
                TagValue::Text(value)
            }
        }
    }
}
