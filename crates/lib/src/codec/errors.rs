//! Error types for codec operations.

use std::path::Path;

use thiserror::Error;

/// Structured error types for reading and writing external formats.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Input was not well-formed JSON
    #[error("Malformed JSON at line {line}, column {column}: {message}")]
    MalformedJson {
        message: String,
        line: usize,
        column: usize,
    },

    /// A file to load does not exist
    #[error("File {path} does not exist or cannot be loaded")]
    FileNotFound { path: String },

    /// A file exists but could not be read
    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    /// A value could not be encoded
    #[error("Encoding failed: {reason}")]
    EncodeFailed { reason: String },
}

impl CodecError {
    pub(crate) fn file_not_found(path: &Path) -> Self {
        CodecError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    pub(crate) fn read_failed(path: &Path, err: &std::io::Error) -> Self {
        CodecError::ReadFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Check if this error reports malformed input
    pub fn is_malformed(&self) -> bool {
        matches!(self, CodecError::MalformedJson { .. })
    }

    /// Check if this error means a file was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, CodecError::FileNotFound { .. })
    }

    /// Check if this error is related to file access
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            CodecError::FileNotFound { .. } | CodecError::ReadFailed { .. }
        )
    }

    /// Get the path if this is a file error
    pub fn path(&self) -> Option<&str> {
        match self {
            CodecError::FileNotFound { path } | CodecError::ReadFailed { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get the line and column if this is a malformed-input error
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            CodecError::MalformedJson { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::MalformedJson {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

// Conversion from CodecError to the main Error type
impl From<CodecError> for crate::Error {
    fn from(err: CodecError) -> Self {
        crate::Error::Codec(err)
    }
}
