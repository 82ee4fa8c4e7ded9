//! Search error types for arbor-search.

use std::path::PathBuf;

/// Errors from crawling, indexing, and searching.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The path to index is missing or not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The directory has no stored index.
    #[error("directory is not indexed: {0}")]
    NotIndexed(PathBuf),

    /// Error while crawling a directory tree.
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Invalid document file-name pattern.
    #[error("invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    /// Invalid value search pattern.
    #[error("invalid regex pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The schema used for matching does not conform to its meta-schema.
    #[error("schema is invalid: {0}")]
    SchemaInvalid(String),

    #[error(transparent)]
    Decode(#[from] arbor_core::DecodeError),

    #[error(transparent)]
    Core(#[from] arbor_core::CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
