//! Error types for Ember Inspect
//!
//! Provides a unified error type for decoding, encoding and reporting.

use thiserror::Error;

/// Result type alias using EmberError
pub type Result<T> = std::result::Result<T, EmberError>;

/// Unified error type for Ember Inspect operations
#[derive(Debug, Error)]
pub enum EmberError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Chunk Document Errors
    // -------------------------------------------------------------------------
    /// The bytes are not a structured document at all
    #[error("Malformed chunk document: {0}")]
    MalformedDocument(String),

    /// A required field is absent; `path` is its logical path
    #[error("Missing required field `{path}`")]
    MissingField { path: String },

    /// A field is present but does not hold its declared type
    #[error("Field `{path}` has the wrong type: expected {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    // -------------------------------------------------------------------------
    // WAL Errors
    // -------------------------------------------------------------------------
    /// A complete frame whose payload is not a valid WAL record
    #[error("Malformed WAL record at offset {offset}: {reason}")]
    MalformedRecord { offset: u64, reason: String },

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    /// NaN and infinities have no JSON representation
    #[error("Field `{path}` holds a non-finite value")]
    NonFiniteValue { path: String },

    #[error("WAL frame payload of {len} bytes exceeds the 4-byte length prefix")]
    FrameTooLarge { len: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EmberError {
    pub(crate) fn missing(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    pub(crate) fn mismatch(path: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
        }
    }
}
