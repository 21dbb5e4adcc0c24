//! Error taxonomy for record operations.
//!
//! Every failure leaving the core carries a stable [`ErrorKind`] so the
//! request layer can map it to an output shape and exit code without
//! inspecting store-specific errors.

use thiserror::Error;

use crate::ports::store::StoreFailure;

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors returned by the identifier allocator and the record index.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record body violates the length limit.
    #[error("Joke is too long: {length} characters (max: {max})")]
    Validation {
        /// Length of the rejected body, in characters.
        length: usize,
        /// Configured maximum length.
        max: usize,
    },

    /// The identifier is not present in the index.
    #[error("There is no joke associated with ID {id:?}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The index holds no records.
    #[error("There are no jokes in the store")]
    Empty,

    /// The backing store failed or returned an inconsistent result.
    #[error("Store error during {operation}: {source}")]
    Store {
        /// Name of the store operation that failed.
        operation: &'static str,
        /// Underlying store failure.
        #[source]
        source: StoreFailure,
    },

    /// The allocator could not find a free identifier.
    #[error("No free identifier found after {attempts} attempts")]
    Capacity {
        /// Number of candidates drawn before giving up.
        attempts: u32,
    },
}

impl RecordError {
    /// Wraps a store failure with the name of the operation that produced it.
    pub(crate) fn store(operation: &'static str, source: impl Into<StoreFailure>) -> Self {
        Self::Store { operation, source: source.into() }
    }

    /// Returns the stable classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Empty => ErrorKind::Empty,
            Self::Store { .. } | Self::Capacity { .. } => ErrorKind::Internal,
        }
    }
}

/// Stable error classification exposed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input violated a stated constraint.
    Validation,
    /// Referenced identifier does not exist.
    NotFound,
    /// Operation needs at least one record and there are none.
    Empty,
    /// Store failure, inconsistency, or allocator exhaustion.
    Internal,
}

impl ErrorKind {
    /// Snake-case label used in error payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Empty => "empty",
            Self::Internal => "internal",
        }
    }

    /// Process exit code for this classification.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::Validation => 2,
            Self::NotFound => 3,
            Self::Empty => 4,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(RecordError::Validation { length: 300, max: 256 }.kind(), ErrorKind::Validation);
        assert_eq!(RecordError::NotFound { id: "abc".into() }.kind(), ErrorKind::NotFound);
        assert_eq!(RecordError::Empty.kind(), ErrorKind::Empty);
        assert_eq!(RecordError::Capacity { attempts: 3 }.kind(), ErrorKind::Internal);
        assert_eq!(RecordError::store("get", "boom").kind(), ErrorKind::Internal);
    }

    #[test]
    fn exit_codes_are_distinct() {
        let kinds = [ErrorKind::Validation, ErrorKind::NotFound, ErrorKind::Empty, ErrorKind::Internal];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn store_error_keeps_operation_and_source() {
        let err = RecordError::store("set_add", "connection reset");
        let msg = err.to_string();
        assert!(msg.contains("set_add"));
        assert!(msg.contains("connection reset"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn validation_message_names_limit() {
        let err = RecordError::Validation { length: 300, max: 256 };
        assert_eq!(err.to_string(), "Joke is too long: 300 characters (max: 256)");
    }
}
