//! Error types for retab

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or running the pipeline.
///
/// Configuration errors (bad regex, malformed filter or transposer
/// expressions, mismatched transpose counts) are all raised before any
/// input line is read. Parse and I/O errors abort the run for the
/// failing input source; there is no retry and no partial result.
#[derive(Error, Debug)]
pub enum RetabError {
    /// A regular expression failed to compile (separator, row pattern,
    /// filter value or transposer search)
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A field filter expression is not of the form `field=regex` or
    /// `field!=regex`
    #[error("invalid filter expression '{0}', expected field=regex or field!=regex")]
    InvalidFilterSyntax(String),

    /// A transposer spec did not split into exactly four parts on its
    /// own delimiter
    #[error("invalid transposer '{0}', expected /search/replace/")]
    InvalidTransposerSyntax(String),

    /// Transpose column and rule counts differ
    #[error("{columns} transpose column(s) given but {rules} replacement rule(s)")]
    ConfigMismatch { columns: usize, rules: usize },

    /// Structured input (CSV or JSON) does not have the expected shape
    #[error("invalid input format: {0}")]
    InvalidFormat(String),

    /// Failed to read an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RetabError {
    /// Build an `InvalidPattern` from a failed regex compilation.
    pub(crate) fn bad_pattern(pattern: &str, err: regex::Error) -> Self {
        RetabError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
