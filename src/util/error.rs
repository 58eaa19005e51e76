//! Error types for the bridge.

use super::{AttributeType, ElementTypeTag};
use thiserror::Error;

/// Main error type for conversion and synchronization.
#[derive(Error, Debug)]
pub enum Error {
    /// No conversion rule takes the source tag into the destination type
    #[error("Type mismatch: cannot convert {source_type} into {dest_type}")]
    TypeMismatch {
        source_type: ElementTypeTag,
        dest_type: AttributeType,
    },

    /// No destination representation exists for the source tag
    #[error("Unsupported source type: {0}")]
    UnsupportedSourceType(ElementTypeTag),

    /// Declared element count does not fit the buffer it describes
    #[error("Size invariant violated: expected {expected} bytes or scalars, got {actual}")]
    SizeInvariant { expected: usize, actual: usize },

    /// Attribute lookup failed in the store
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    /// Store rejected a write
    #[error("Store error: {0}")]
    Store(String),

    /// Settings failed validation
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a type mismatch error.
    pub fn mismatch(source_type: ElementTypeTag, dest_type: AttributeType) -> Self {
        Self::TypeMismatch { source_type, dest_type }
    }
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;
