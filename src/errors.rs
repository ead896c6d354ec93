// Copyright 2025 Cowboy AI, LLC.

//! Error types for governance operations

use thiserror::Error;

/// Errors that can occur in governance and domain operations
///
/// None of these errors are transient. Each one signals a programming,
/// authorization or caller error that must surface to the caller immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A write-once field was asked to change a value already recorded
    #[error("Access denied on {field}: {reason}")]
    AccessDenied {
        /// Name of the guarded field
        field: &'static str,
        /// Why the write was rejected
        reason: String,
    },

    /// A required reference was absent or empty, or a timestamp was not in UTC
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A field failed its boundary constraint (length, required)
    #[error("Validation error on {field}: {reason}")]
    ValidationError {
        /// Name of the offending field
        field: &'static str,
        /// Description of the violated constraint
        reason: String,
    },

    /// A workflow graph is not internally consistent
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// An exact amount does not fit the decimal representation
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for governance operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl DomainError {
    /// Create an access denied error for a guarded field
    pub fn access_denied(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::AccessDenied {
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        DomainError::InvalidArgument(msg.into())
    }

    /// Create a validation error for a field
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::ValidationError {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this is a governance violation
    pub fn is_access_denied(&self) -> bool {
        matches!(self, DomainError::AccessDenied { .. })
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DomainError::InvalidArgument(_))
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::ValidationError { .. } | DomainError::InvalidStructure(_)
        )
    }

    /// Whether retrying the same operation could succeed
    pub fn is_retryable(&self) -> bool {
        false
    }
}
