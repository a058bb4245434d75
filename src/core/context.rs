//! Scan orchestration.
//!
//! [`ScanContext`] ties the engine together: it resolves the scan root and
//! config (failing fast on configuration problems, before any per-file
//! work), runs the locate -> parse -> validate pipeline for every file on
//! rayon workers, and aggregates the results into a [`ScanReport`]. Per-file
//! processing shares no mutable state; the aggregation step is the only
//! synchronization point, and it runs the cross-record graph checks once all
//! files are in.

use std::{fs, path::{Path, PathBuf}};

use anyhow::{Result, anyhow};
use rayon::prelude::*;

use crate::config::{Config, load_config};
use crate::core::comment_syntax::CommentSyntax;
use crate::core::file_scanner::scan_files;
use crate::core::graph::DependencyGraph;
use crate::core::locator::locate_blocks;
use crate::core::parser::parse_block;
use crate::core::record::MetadataRecord;
use crate::core::report::ScanReport;
use crate::core::schema::validate_record;
use crate::issues::{IssueKind, ValidationIssue};

/// Result of one file's pipeline run.
struct FileScan {
    records: Vec<MetadataRecord>,
    issues: Vec<ValidationIssue>,
}

pub struct ScanContext {
    pub root: PathBuf,
    pub config: Config,
    pub verbose: bool,
}

impl ScanContext {
    /// Resolve the scan root and configuration.
    ///
    /// A missing or non-directory/non-file root is a configuration error and
    /// aborts before any scanning starts.
    pub fn new(path: &Path, verbose: bool) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!("Path does not exist: {}", path.display()));
        }

        let start_dir = if path.is_dir() {
            path.to_path_buf()
        } else {
            path.parent().map(Path::to_path_buf).unwrap_or_default()
        };
        let config = load_config(&start_dir)?.config;

        Ok(Self {
            root: path.to_path_buf(),
            config,
            verbose,
        })
    }

    /// Run the full scan and aggregate the report.
    pub fn scan(&self, repository: Option<String>) -> ScanReport {
        let files: Vec<String> = if self.root.is_file() {
            vec![self.root.to_string_lossy().into_owned()]
        } else {
            scan_files(
                &self.root,
                &self.config.includes,
                &self.config.ignores,
                &self.config.extensions,
                self.verbose,
            )
            .files
            .into_iter()
            .collect()
        };
        let files_processed = files.len();

        let scans: Vec<FileScan> = files
            .par_iter()
            .map(|file| self.scan_file(file))
            .collect();

        let mut records = Vec::new();
        let mut issues = Vec::new();
        for scan in scans {
            records.extend(scan.records);
            issues.extend(scan.issues);
        }

        let graph = DependencyGraph::build(&records, &self.config.declared_phases);
        issues.extend(graph.issues());

        ScanReport::build(files_processed, records, issues, &graph, repository)
    }

    /// One file's locate -> parse -> validate pipeline.
    fn scan_file(&self, file: &str) -> FileScan {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(err) => {
                // Unreadable files are skipped, reported, and the scan
                // continues with the rest.
                return FileScan {
                    records: Vec::new(),
                    issues: vec![ValidationIssue::error(
                        IssueKind::Io,
                        file,
                        0,
                        format!("Failed to read file: {}", err),
                    )],
                };
            }
        };

        let extension = Path::new(file)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let syntax = CommentSyntax::for_extension(extension);

        let mut records = Vec::new();
        let mut issues = Vec::new();

        for block in locate_blocks(&content, &syntax) {
            let (record, mut parse_issues) = parse_block(&block, file);
            issues.append(&mut parse_issues);

            if record.decl_line.is_none() {
                issues.push(
                    ValidationIssue::error(
                        IssueKind::NoDeclaration,
                        file,
                        block.start_line,
                        "Metadata block with no attached declaration",
                    )
                    .with_phase(record.phase.clone()),
                );
            }

            issues.extend(validate_record(&record, &self.config));
            records.push(record);
        }

        FileScan { records, issues }
    }
}
