//! Domain errors
//!
//! Failures that callers may want to match on. I/O and CSV parsing failures
//! travel as `anyhow::Error` with file context attached by the loaders.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ViewerError {
    #[error("{context}: missing expected column '{column}'. Available columns: {available:?}")]
    MissingColumn {
        context: String,
        column: String,
        available: Vec<String>,
    },

    #[error("{context}: null value in column '{column}' at row {row}")]
    NullValue {
        context: String,
        column: String,
        row: usize,
    },

    #[error("{context}: non-finite coordinate in column '{column}' at row {row}")]
    InvalidCoordinate {
        context: String,
        column: String,
        row: usize,
    },

    #[error("{0}: table has no data rows")]
    EmptyTable(String),

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("duplicate score cell at (x={x}, y={y}): {first} vs {second}")]
    DuplicateCell {
        x: f64,
        y: f64,
        first: f64,
        second: f64,
    },

    #[error("{context}: column length mismatch ({left} vs {right})")]
    LengthMismatch {
        context: String,
        left: usize,
        right: usize,
    },

    #[error("unknown viewer kind '{0}' (expected graph, world or scores)")]
    UnknownViewer(String),
}
