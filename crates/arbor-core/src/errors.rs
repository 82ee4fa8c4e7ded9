//! Cross-cutting error types for arbor.
//!
//! Domain-specific errors (`TreeError`, `SchemaError`, `SearchError`, ...) live in
//! their own crates. `CoreError` covers what any crate can hit while touching
//! documents on disk.

use thiserror::Error;

use crate::coerce::CoercionError;
use crate::document::DecodeError;

/// Errors that can be raised by any arbor crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A document could not be read or parsed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A cell value could not be read as its declared type.
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// Filesystem failure while writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while writing.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
