//! # arbor-search
//!
//! Search support over directories of JSON documents.
//!
//! - [`flatten_for_search`] collapses a nested document into one flat map,
//!   renaming colliding keys with numeric suffixes.
//! - [`build_index`] crawls a directory for document files.
//! - [`IndexStore`] persists one file list per indexed directory and detects
//!   when a list has gone stale.
//! - [`value_search`] and [`schema_matching_search`] filter indexed files.

pub mod error;
pub mod flatten;
pub mod index;
pub mod search;
pub mod walk;

pub use error::SearchError;
pub use flatten::flatten_for_search;
pub use index::{CheckStatus, DirectoryCheck, IndexFile, IndexStore, MainIndex};
pub use search::{SearchQuery, schema_matching_search, value_search};
pub use walk::{DEFAULT_DOCUMENT_GLOB, build_index};
