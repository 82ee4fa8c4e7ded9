//! # arbor-convert
//!
//! Conversion between documents and trees.
//!
//! [`materialize`] walks a document and the schema [`MetadataMap`] in lockstep
//! and appends one row per document key. Keys the schema does not know, and
//! shapes it does not expect, become visible error rows instead of failures.
//! [`flatten`] inverts the conversion and coerces each leaf by its type tag.
//!
//! [`MetadataMap`]: arbor_schema::MetadataMap

mod error;
mod flatten;
mod materialize;

pub use error::ConvertError;
pub use flatten::{flatten, flatten_tree};
pub use materialize::{
    ARRAY_ITEM_DESCRIPTION, IssueKind, KEY_ERROR_DESCRIPTION, KEY_ERROR_TITLE, Materialized,
    Materializer, SchemaIssue, VALUE_ERROR_DESCRIPTION, VALUE_ERROR_TITLE, materialize,
    materialize_document,
};
