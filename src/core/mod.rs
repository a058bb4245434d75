//! Core scan engine.
//!
//! The pipeline runs leaf-first: the locator finds candidate comment
//! regions, the parser turns them into records, the schema validator checks
//! each record, and the context aggregates everything - including the
//! cross-record dependency graph - into one [`ScanReport`].

pub mod comment_syntax;
pub mod context;
pub mod file_scanner;
pub mod graph;
pub mod locator;
pub mod parser;
pub mod record;
pub mod report;
pub mod schema;

pub use comment_syntax::CommentSyntax;
pub use context::ScanContext;
pub use graph::DependencyGraph;
pub use locator::{RawBlock, locate_blocks};
pub use parser::{parse_block, split_list};
pub use record::{Complexity, MetadataRecord, Status, TagValue};
pub use report::{HighRiskItem, PhaseNode, ScanReport, StatusAnalysis};
pub use schema::{ACD_VERSION, validate_record};
