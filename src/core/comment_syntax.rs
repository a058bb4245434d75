//! Per-language comment delimiters.
//!
//! The engine never parses the underlying language; a file contributes only
//! its comment text. Each scanned extension maps to a [`CommentSyntax`]
//! describing how comments are written in that language. The mapping is a
//! plain table - adding a language means adding a row, not a type.

/// Comment delimiters for one language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Line-comment prefix, e.g. `//` or `#`.
    pub line_prefix: Option<&'static str>,
    /// Block-comment delimiters, e.g. `/*` and `*/`.
    pub block: Option<(&'static str, &'static str)>,
}

impl CommentSyntax {
    /// C-family syntax: `//` line comments and `/* */` block comments.
    pub const C: CommentSyntax = CommentSyntax {
        line_prefix: Some("//"),
        block: Some(("/*", "*/")),
    };

    /// Hash-prefixed line comments (`#`), no block comments.
    pub const HASH: CommentSyntax = CommentSyntax {
        line_prefix: Some("#"),
        block: None,
    };

    /// Look up the syntax for a file extension (without the dot).
    ///
    /// Unknown extensions fall back to C-family syntax, which keeps the
    /// scanner lenient when a config lists an extension this table has no
    /// row for.
    pub fn for_extension(ext: &str) -> CommentSyntax {
        match ext {
            "py" | "sh" | "rb" | "pl" => CommentSyntax::HASH,
            _ => CommentSyntax::C,
        }
    }
}
