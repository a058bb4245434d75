//! Metadata record types.
//!
//! A [`MetadataRecord`] is one parsed tag block: the typed projection of the
//! registered tags plus an ordered bag of everything else, pinned to the
//! file/line the locator found it at. Records are created once per scan and
//! never mutated afterwards; the validator and the aggregator only read them.

use serde_json::{Map, Value};

/// Declared implementation maturity of a code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Implemented,
    Partial,
    NotStarted,
    Fixed,
    Deprecated,
}

impl Status {
    pub fn parse(value: &str) -> Option<Status> {
        match value {
            "IMPLEMENTED" => Some(Status::Implemented),
            "PARTIAL" => Some(Status::Partial),
            "NOT_STARTED" => Some(Status::NotStarted),
            "FIXED" => Some(Status::Fixed),
            "DEPRECATED" => Some(Status::Deprecated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Implemented => "IMPLEMENTED",
            Status::Partial => "PARTIAL",
            Status::NotStarted => "NOT_STARTED",
            Status::Fixed => "FIXED",
            Status::Deprecated => "DEPRECATED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declared risk/difficulty rating of a code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Complexity {
    Low,
    Medium,
    High,
    Critical,
}

impl Complexity {
    pub fn parse(value: &str) -> Option<Complexity> {
        match value {
            "LOW" => Some(Complexity::Low),
            "MEDIUM" => Some(Complexity::Medium),
            "HIGH" => Some(Complexity::High),
            "CRITICAL" => Some(Complexity::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "LOW",
            Complexity::Medium => "MEDIUM",
            Complexity::High => "HIGH",
            Complexity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value of a tag outside the typed fields.
///
/// Unregistered tags and the registered pass-through tags (`AI_PATTERN`,
/// `AI_CONTEXT`, ...) keep whatever shape the annotator wrote: plain text,
/// an integer, or a structured JSON value. Structured values are carried
/// opaquely - no schema is enforced on their interior.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Integer(i64),
    Structured(Value),
}

impl TagValue {
    pub fn to_json(&self) -> Value {
        match self {
            TagValue::Text(text) => Value::String(text.clone()),
            TagValue::Integer(n) => Value::from(*n),
            TagValue::Structured(value) => value.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One parsed tag block.
///
/// Scalar fields hold the raw tag values verbatim; `parsed_status` and
/// `parsed_complexity` give the enum view when the value is well-formed.
/// `dependencies`/`commit_history` distinguish an absent tag (`None`) from a
/// tag present with an empty value (`Some(vec![])`).
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    pub file: String,
    /// 1-based first line of the comment region containing the block.
    pub line: usize,
    /// Line of the first code declaration after the block, when one exists.
    pub decl_line: Option<usize>,
    pub phase: Option<String>,
    pub status: Option<String>,
    pub complexity: Option<String>,
    pub note: Option<String>,
    pub dependencies: Option<Vec<String>>,
    pub commit: Option<String>,
    pub commit_history: Option<Vec<String>>,
    /// Every other tag, registered or not, in source order.
    pub extra: Vec<(String, TagValue)>,
}

impl MetadataRecord {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
            decl_line: None,
            phase: None,
            status: None,
            complexity: None,
            note: None,
            dependencies: None,
            commit: None,
            commit_history: None,
            extra: Vec::new(),
        }
    }

    pub fn parsed_status(&self) -> Option<Status> {
        self.status.as_deref().and_then(Status::parse)
    }

    pub fn parsed_complexity(&self) -> Option<Complexity> {
        self.complexity.as_deref().and_then(Complexity::parse)
    }

    /// Phase name for aggregation, with the conventional fallback for
    /// records whose required phase tag is missing or empty.
    pub fn phase_or_unknown(&self) -> &str {
        self.phase.as_deref().unwrap_or("UNKNOWN")
    }

    /// Status value for aggregation, `UNKNOWN` when absent.
    pub fn status_or_unknown(&self) -> &str {
        self.status.as_deref().unwrap_or("UNKNOWN")
    }

    /// Whether the block carried the given tag at all.
    pub fn has_tag(&self, name: &str) -> bool {
        match name {
            "AI_PHASE" => self.phase.is_some(),
            "AI_STATUS" => self.status.is_some(),
            "AI_COMPLEXITY" => self.complexity.is_some(),
            "AI_NOTE" => self.note.is_some(),
            "AI_DEPENDENCIES" => self.dependencies.is_some(),
            "AI_COMMIT" => self.commit.is_some(),
            "AI_COMMIT_HISTORY" => self.commit_history.is_some(),
            _ => self.extra.iter().any(|(tag, _)| tag == name),
        }
    }

    /// JSON projection with the raw tag names, as exported in the
    /// `acd_metadata` array. List-valued tags become arrays, never
    /// comma-joined strings.
    pub fn to_json(&self, repository: Option<&str>, timestamp_utc: &str) -> Value {
        let mut map = Map::new();
        map.insert("file".into(), Value::String(self.file.clone()));
        map.insert("line".into(), Value::from(self.line));
        map.insert("timestamp_utc".into(), Value::String(timestamp_utc.into()));

        if let Some(phase) = &self.phase {
            map.insert("AI_PHASE".into(), Value::String(phase.clone()));
        }
        if let Some(status) = &self.status {
            map.insert("AI_STATUS".into(), Value::String(status.clone()));
        }
        if let Some(complexity) = &self.complexity {
            map.insert("AI_COMPLEXITY".into(), Value::String(complexity.clone()));
        }
        if let Some(note) = &self.note {
            map.insert("AI_NOTE".into(), Value::String(note.clone()));
        }
        if let Some(deps) = &self.dependencies {
            map.insert("AI_DEPENDENCIES".into(), string_array(deps));
        }
        if let Some(commit) = &self.commit {
            map.insert("AI_COMMIT".into(), Value::String(commit.clone()));
        }
        if let Some(history) = &self.commit_history {
            map.insert("AI_COMMIT_HISTORY".into(), string_array(history));
        }
        for (tag, value) in &self.extra {
            map.insert(tag.clone(), value.to_json());
        }

        map.insert(
            "repository".into(),
            repository.map_or(Value::Null, |name| Value::String(name.into())),
        );

        Value::Object(map)
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}
