//! Centralized error types for fht.
//!
//! Uses thiserror for ergonomic error handling with context.

use thiserror::Error;

/// Main error type for fht operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FhtError {
    /// Transform length is zero or not an exact power of two.
    #[error("Invalid dimension: length {length} is not a power of two")]
    InvalidDimension { length: usize },

    /// Input/output buffers disagree with the declared geometry.
    #[error("Buffer size mismatch: expected {expected} elements, got input={input}, output={output}")]
    BufferSizeMismatch {
        expected: usize,
        input: usize,
        output: usize,
    },

    /// Axis index out of range, or listed more than once.
    #[error("Invalid axis {axis} for tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// Invalid configuration detected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dedicated worker pool could not be built.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// A text matrix value could not be parsed.
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A text matrix row has a different width than the first row.
    #[error("Ragged row on line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context.
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, FhtError>;

impl FhtError {
    /// Check if the error is a caller shape violation.
    ///
    /// These are raised before any output is written and never succeed on retry.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            FhtError::InvalidDimension { .. }
                | FhtError::BufferSizeMismatch { .. }
                | FhtError::InvalidAxis { .. }
        )
    }
}
