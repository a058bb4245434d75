//! Comment block locator.
//!
//! Scans raw file text for contiguous comment regions that carry an
//! `AI_PHASE:` marker and yields them as raw blocks for the tag parser.
//!
//! # Region Handling
//!
//! Adjacent line comments with no non-comment line between them merge into
//! one region; a single block comment is one region. A blank or code line
//! breaks the chain:
//!
//! ```c
//! // AI_PHASE: INIT
//! // AI_STATUS: IMPLEMENTED
//! int init(void);        // <- both lines form one region, attached here
//! ```
//!
//! A region yields at most one block, no matter how many `AI_PHASE` markers
//! it contains; a second marker only starts a new block after the comment
//! region has been closed and reopened.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::comment_syntax::CommentSyntax;

/// First-required-tag marker that qualifies a comment region as a metadata
/// block. Tag names are case-sensitive.
static PHASE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*AI_PHASE\s*:").expect("valid marker pattern"));

/// One comment region containing an `AI_PHASE` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// 1-based first line of the comment region.
    pub start_line: usize,
    /// 1-based last line of the comment region.
    pub end_line: usize,
    /// Interior lines with comment decoration stripped, in source order.
    pub lines: Vec<String>,
    /// 1-based line of the first non-blank, non-comment line after the
    /// region, when one exists before end-of-file.
    pub decl_line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Comment,
    Blank,
    Code,
}

struct Region {
    start: usize, // 0-based
    end: usize,   // 0-based inclusive
    lines: Vec<String>,
}

/// Locate all metadata blocks in a file's text.
pub fn locate_blocks(content: &str, syntax: &CommentSyntax) -> Vec<RawBlock> {
    let lines: Vec<&str> = content.lines().collect();
    let (regions, kinds) = collect_regions(&lines, syntax);

    regions
        .into_iter()
        .filter(|region| region.lines.iter().any(|line| PHASE_MARKER.is_match(line)))
        .map(|region| {
            let decl_line = kinds[region.end + 1..]
                .iter()
                .position(|kind| *kind == LineKind::Code)
                .map(|offset| region.end + 1 + offset + 1);
            RawBlock {
                start_line: region.start + 1,
                end_line: region.end + 1,
                lines: region.lines,
                decl_line,
            }
        })
        .collect()
}

fn collect_regions(lines: &[&str], syntax: &CommentSyntax) -> (Vec<Region>, Vec<LineKind>) {
    let mut regions: Vec<Region> = Vec::new();
    let mut kinds = Vec::with_capacity(lines.len());

    // Open line-comment run, if any
    let mut run: Option<Region> = None;
    // Open multi-line block comment, if any
    let mut block: Option<Region> = None;

    for (i, raw) in lines.iter().enumerate() {
        let trimmed = raw.trim();

        if let Some(open) = &mut block {
            kinds.push(LineKind::Comment);
            if let Some((_, close)) = syntax.block
                && let Some(pos) = trimmed.find(close)
            {
                open.lines.push(strip_star(&trimmed[..pos]).to_string());
                open.end = i;
                regions.push(block.take().unwrap());
            } else {
                open.lines.push(strip_star(trimmed).to_string());
                open.end = i;
            }
            continue;
        }

        // Block-comment opener ends any pending line-comment run: the two
        // kinds do not merge into one region.
        if let Some((open_delim, close_delim)) = syntax.block
            && trimmed.starts_with(open_delim)
        {
            if let Some(pending) = run.take() {
                regions.push(pending);
            }
            kinds.push(LineKind::Comment);

            let interior = trimmed[open_delim.len()..].trim_start_matches('*');
            if let Some(pos) = interior.find(close_delim) {
                // Single-line block comment
                regions.push(Region {
                    start: i,
                    end: i,
                    lines: vec![interior[..pos].to_string()],
                });
            } else {
                block = Some(Region {
                    start: i,
                    end: i,
                    lines: vec![interior.to_string()],
                });
            }
            continue;
        }

        if let Some(prefix) = syntax.line_prefix
            && trimmed.starts_with(prefix)
        {
            kinds.push(LineKind::Comment);
            let stripped = trimmed[prefix.len()..].to_string();
            match &mut run {
                Some(pending) => {
                    pending.lines.push(stripped);
                    pending.end = i;
                }
                None => {
                    run = Some(Region {
                        start: i,
                        end: i,
                        lines: vec![stripped],
                    });
                }
            }
            continue;
        }

        // Blank and code lines both break a line-comment run.
        if let Some(pending) = run.take() {
            regions.push(pending);
        }
        kinds.push(if trimmed.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Code
        });
    }

    // Regions still open at end-of-file
    if let Some(pending) = run.take() {
        regions.push(pending);
    }
    if let Some(open) = block.take() {
        regions.push(open);
    }

    regions.sort_by_key(|region| region.start);
    (regions, kinds)
}

/// Strip the decorative leading `*` of block-comment continuation lines.
fn strip_star(line: &str) -> &str {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix('*') {
        // `*/` is handled by the caller; a lone `*` is decoration
        rest
    } else {
        trimmed
    }
}
