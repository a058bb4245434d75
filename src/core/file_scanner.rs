//! Directory traversal and file selection.
//!
//! Walks the scan root, keeping files whose extension is configured for
//! scanning and filtering against include/ignore patterns. Patterns with
//! glob wildcards match paths; patterns without wildcards are literal
//! directory paths, so bracketed directory names need no escaping.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct FileScanResult {
    /// Selected file paths, sorted for deterministic downstream processing.
    pub files: BTreeSet<String>,
    /// Paths that could not be traversed.
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    extensions: &[String],
    verbose: bool,
) -> FileScanResult {
    let mut files: BTreeSet<String> = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!("{} Invalid ignore pattern '{}': {}", "warning:".bold().yellow(), p, e);
                    }
                }
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        includes
            .iter()
            .filter_map(|inc| {
                let path = base_dir.join(inc);
                if path.exists() {
                    Some(path)
                } else {
                    if verbose {
                        eprintln!(
                            "{} Include path does not exist: {}",
                            "warning:".bold().yellow(),
                            path.display()
                        );
                    }
                    None
                }
            })
            .collect()
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && has_scannable_extension(path, extensions) {
                files.insert(path_str.into());
            }
        }
    }

    FileScanResult {
        files,
        skipped_count,
    }
}

fn has_scannable_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}
