//! Shared Error Types
//!
//! Errors produced while checking client input before it reaches the
//! backend services. Request types in this module tree return them from
//! their `validate` methods.
//!
//! # Usage
//!
//! ```rust
//! use boardwalk::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title is required");
//! assert_eq!(error.field(), Some("title"));
//! ```
use thiserror::Error;

/// Shared error types for request validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A value could not be parsed into a known variant
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant {
        /// What was being parsed (e.g. "task status")
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-variant error
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }

    /// The offending field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::UnknownVariant { .. } => None,
        }
    }

    /// The message without the field prefix
    pub fn message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            Self::UnknownVariant { .. } => self.to_string(),
        }
    }
}
