/*!
 * Error types for the glossalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while validating or parsing configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No tier markers were configured
    #[error("At least one tier marker must be configured")]
    NoMarkers,

    /// A tier marker is blank or contains whitespace
    #[error("Invalid tier marker {0:?}: markers must be non-empty and contain no whitespace")]
    InvalidMarker(String),

    /// The same tier marker appears twice in the cycle
    #[error("Tier marker {0:?} appears more than once")]
    DuplicateMarker(String),

    /// The marker delimiter is empty or spans lines
    #[error("Invalid marker delimiter {0:?}: must be non-empty and single-line")]
    InvalidDelimiter(String),

    /// Spacing between columns must be at least one
    #[error("Column spacing must be at least 1, got {0}")]
    InvalidSpacing(usize),

    /// A codepoint range could not be parsed
    #[error("Invalid codepoint range {input:?}: {reason}")]
    InvalidRange {
        /// Raw range text
        input: String,
        /// What was wrong with it
        reason: String,
    },
}

/// Errors that can occur inside the realignment engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RealignError {
    /// A tier line could not be tokenized
    #[error("Malformed line {line_number}: {reason}\n  {line}")]
    MalformedLine {
        /// 1-based line number in the input document
        line_number: usize,
        /// Raw text of the offending line
        line: String,
        /// Why the line was rejected
        reason: String,
    },

    /// Contract violation between engine components
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// Configuration rejected before processing started
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RealignError {
    /// Build a malformed line error
    pub fn malformed(line_number: usize, line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line_number,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration loading or validation
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the realignment engine
    #[error("Realign error: {0}")]
    Realign(#[from] RealignError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
