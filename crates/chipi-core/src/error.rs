//! Error types for chipi operations.
//!
//! Every failure a handler can report maps onto one of three families:
//! a missing category or index, rejected input, or a storage failure.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for chipi operations.
pub type ChipiResult<T> = Result<T, ChipiError>;

/// Main error type for all chipi operations.
#[derive(Error, Debug)]
pub enum ChipiError {
    /// Referenced category or response index does not exist.
    #[error("Not found: {message}")]
    NotFound { message: String, code: ErrorCode },

    /// Missing required field, duplicate entry or protected category.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String, code: ErrorCode },

    /// The backing store could not be written.
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backing document exists but is not a valid category mapping.
    #[error("Corrupt training data at {}: {source}", .path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lookup (NF_xxx)
    CategoryNotFound,
    IndexOutOfRange,

    // Validation (VAL_xxx)
    MissingField,
    DuplicatePattern,
    DuplicateCategory,
    ProtectedCategory,

    // Storage (STO_xxx)
    WriteFailed,
    CorruptData,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::CategoryNotFound => "NF_001",
            ErrorCode::IndexOutOfRange => "NF_002",
            ErrorCode::MissingField => "VAL_001",
            ErrorCode::DuplicatePattern => "VAL_002",
            ErrorCode::DuplicateCategory => "VAL_003",
            ErrorCode::ProtectedCategory => "VAL_004",
            ErrorCode::WriteFailed => "STO_001",
            ErrorCode::CorruptData => "STO_002",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl ChipiError {
    /// Create a not found error for a category.
    pub fn category_not_found(name: &str) -> Self {
        Self::NotFound {
            message: format!("Category {} not found", name),
            code: ErrorCode::CategoryNotFound,
        }
    }

    /// Create a not found error for a response index.
    pub fn index_out_of_range() -> Self {
        Self::NotFound {
            message: "Response index out of range".to_string(),
            code: ErrorCode::IndexOutOfRange,
        }
    }

    /// Create an invalid input error for a missing required field.
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            code: ErrorCode::MissingField,
        }
    }

    /// Create an invalid input error with a specific code.
    pub fn invalid_input(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::InvalidInput {
            message: message.into(),
            code,
        }
    }

    /// Create a persistence error wrapping its cause.
    pub fn persistence(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            code: ErrorCode::WriteFailed,
            source: Some(Box::new(source)),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { code, .. } => *code,
            Self::InvalidInput { code, .. } => *code,
            Self::Persistence { code, .. } => *code,
            Self::CorruptData { .. } => ErrorCode::CorruptData,
            _ => ErrorCode::Internal,
        }
    }

    /// Message suitable for showing to an API client.
    ///
    /// Storage and internal failures collapse to a generic text so paths and
    /// OS error details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { message, .. } | Self::InvalidInput { message, .. } => {
                message.clone()
            }
            Self::Persistence { .. } | Self::Io(_) => {
                "Failed to persist training data".to_string()
            }
            _ => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_not_found_error() {
        let err = ChipiError::category_not_found("weather");
        assert_eq!(err.code(), ErrorCode::CategoryNotFound);
        assert_eq!(err.public_message(), "Category weather not found");
    }

    #[test]
    fn test_persistence_error_hides_details() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full at /secret/path");
        let err = ChipiError::persistence("Failed to write training data", io);
        assert_eq!(err.code(), ErrorCode::WriteFailed);
        assert!(!err.public_message().contains("/secret/path"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::CategoryNotFound.as_str(), "NF_001");
        assert_eq!(ErrorCode::ProtectedCategory.as_str(), "VAL_004");
    }
}
