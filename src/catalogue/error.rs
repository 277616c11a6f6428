//! Error types for catalogue parsing.

use thiserror::Error;

/// Errors that abort a catalogue parse.
///
/// Only syntax errors unwind to the top level; resolution failures inside
/// playlist expansion are warnings and never surface here.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// A line that is neither blank, comment, directive, nor a
    /// recognizable url.
    #[error("invalid syntax at line {line_number}: {line}")]
    InvalidSyntax {
        /// 1-based line number in the catalogue file.
        line_number: usize,
        /// The offending line, as read.
        line: String,
    },
}

impl CatalogueError {
    /// Creates an `InvalidSyntax` error for the given 1-based line.
    #[must_use]
    pub fn invalid_syntax(line_number: usize, line: &str) -> Self {
        Self::InvalidSyntax {
            line_number,
            line: line.to_string(),
        }
    }
}
