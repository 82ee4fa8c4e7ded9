//! # arbor-schema
//!
//! Everything arbor does with a JSON Schema document:
//!
//! - [`walk`] traverses the `properties` declarations and derives a blank
//!   document, the verbatim per-key fragments, or one attribute per key.
//! - [`MetadataMap`] is the typed metadata tree the materializer consults.
//! - [`validate`] and [`validate_files`] wrap `jsonschema` and report a
//!   four-way [`ValidationOutcome`].
//! - [`SchemaStore`] keeps schemas and per-schema default documents on disk.

pub mod error;
pub mod metadata;
pub mod store;
pub mod validator;
pub mod walker;

pub use error::SchemaError;
pub use metadata::{FieldMeta, MetaEntry, MetadataMap};
pub use store::{DEFAULT_SCHEMA_NAME, SchemaStore};
pub use validator::{ValidationOutcome, validate, validate_files};
pub use walker::{WalkMode, blank_document, walk};
