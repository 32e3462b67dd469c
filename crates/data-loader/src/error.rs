//! Error types for the data-loader crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - Enum variants for different error cases
//! - Error messages with context

use thiserror::Error;

/// Errors that can occur while loading and validating a snapshot.
///
/// These are contract violations (bad files, dangling references), not
/// domain-data quality issues — malformed age ranges or unknown
/// qualification strings are legal input that the engine treats as
/// non-matches, and never surface here.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// I/O error occurred while reading a snapshot file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a snapshot file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., rating for an unknown vacancy)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// Snapshot validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SnapshotError>;
