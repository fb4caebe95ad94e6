//! Error types for the records crate.
//!
//! Storage I/O is the only failure a record operation can have. Callers
//! add their own context (which dialog, which user) with `.context()`.

use std::fmt;

/// Errors from record storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Reading a record resource failed.
    ReadFailed {
        /// The resource being read.
        path: String,
        /// Error details.
        details: String,
    },
    /// Appending to or rewriting a record resource failed.
    WriteFailed {
        /// The resource being written.
        path: String,
        /// Error details.
        details: String,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { path, details } => {
                write!(f, "failed to read records from '{path}': {details}")
            }
            Self::WriteFailed { path, details } => {
                write!(f, "failed to write records to '{path}': {details}")
            }
        }
    }
}

impl std::error::Error for RecordError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_display() {
        let err = RecordError::WriteFailed {
            path: "reservations.txt".to_string(),
            details: "disk full".to_string(),
        };
        assert!(err.to_string().contains("reservations.txt"));
        assert!(err.to_string().contains("disk full"));
    }
}
