/// Error types for SalaryDash
///
/// Loading the dataset is the only fallible I/O in the crate and a failure
/// there ends the session. Criteria errors come from user selections that
/// name values the store does not contain.
///
/// An empty filtered view is not an error: every stage downstream of the
/// filter answers an empty view with zero metrics and "no data" panels.

use thiserror::Error;

/// Failure to build a `RecordStore` from its source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data source '{source_name}' is unreachable: {reason}")]
    Unreachable { source_name: String, reason: String },

    #[error("data source is empty (no header row)")]
    Empty,

    #[error("data source is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed record on data line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Rejected filter selection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("unknown filter column '{0}'")]
    UnknownColumn(String),

    #[error("value '{value}' is not available for column '{column}'")]
    UnknownValue { column: String, value: String },
}

/// Invalid server configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),
}
