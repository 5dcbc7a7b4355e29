//! # Error Hierarchy
//!
//! Structured error types shared by every crate in the workspace, built with
//! `thiserror`. Each variant carries the offending input so operators can
//! diagnose a bad catalog or configuration without guesswork.

use thiserror::Error;

use crate::identity::JobId;

/// Validation errors for domain primitives and policy values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Job identifier text is not an integer.
    #[error("invalid job id: \"{0}\" (expected an integer)")]
    InvalidJobId(String),

    /// Timestamp string is not valid RFC 3339.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A policy threshold is outside its permitted range.
    #[error("invalid policy value for {field}: {value} ({reason})")]
    InvalidPolicy {
        /// The policy field name.
        field: &'static str,
        /// The rejected value.
        value: usize,
        /// The permitted range.
        reason: String,
    },
}

/// Errors raised by job/copy stores and verdict or alert sinks.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A copy was recorded for a job the store does not know.
    #[error("unknown backup job {0}")]
    UnknownJob(JobId),

    /// Two job records share the same id.
    #[error("duplicate backup job {0}")]
    DuplicateJob(JobId),

    /// The backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data could not be decoded.
    #[error("parse error in {source_name}: {reason}")]
    Parse {
        /// File or stream that failed to parse.
        source_name: String,
        /// Decoder message.
        reason: String,
    },

    /// The backend refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
