//! Schema error types.

use std::path::PathBuf;

use arbor_core::DecodeError;
use thiserror::Error;

/// Errors from walking or storing schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema root declares no `properties` object.
    #[error("schema has no \"properties\" declaration")]
    MissingProperties,

    /// The schema or stored document could not be read.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A named schema or default document is not in storage.
    #[error("'{name}' not found in {dir}")]
    NotFound { name: String, dir: PathBuf },

    /// Storage already holds a schema under this file name.
    #[error("schema '{0}' already exists in storage")]
    AlreadyExists(String),

    /// The path has no usable file name.
    #[error("invalid schema file name: {0}")]
    InvalidName(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] arbor_core::CoreError),
}
