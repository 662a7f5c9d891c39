//! Error types for container operations.
//!
//! Lookups never fail: a missing path yields the caller's default. The
//! errors here cover arguments an operation cannot work with and values of
//! the wrong type.

use thiserror::Error;

use crate::value::Value;

/// Structured error types for container operations.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// An operation was given an argument it cannot work with
    #[error("Invalid argument to {operation}: {reason}")]
    InvalidArgument { operation: String, reason: String },

    /// A value did not have the type the caller asked for
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl ContainerError {
    /// Builds an [`ContainerError::InvalidArgument`] for `operation`
    pub fn invalid_argument(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        ContainerError::InvalidArgument {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`ContainerError::TypeMismatch`] naming the type found in `actual`
    pub fn type_mismatch(expected: impl Into<String>, actual: &Value) -> Self {
        ContainerError::TypeMismatch {
            expected: expected.into(),
            actual: actual.type_name().to_string(),
        }
    }

    /// Check if this error is an invalid argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ContainerError::InvalidArgument { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, ContainerError::TypeMismatch { .. })
    }

    /// Get the operation if this is an invalid-argument error
    pub fn operation(&self) -> Option<&str> {
        match self {
            ContainerError::InvalidArgument { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

// Conversion from ContainerError to the main Error type
impl From<ContainerError> for crate::Error {
    fn from(err: ContainerError) -> Self {
        crate::Error::Container(err)
    }
}
