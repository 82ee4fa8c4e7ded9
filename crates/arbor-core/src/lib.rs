//! # arbor-core
//!
//! Foundational types shared by every arbor crate:
//! - The tagged row model (`Cell`, `Row`, `Column`, `Record`) stored in tree nodes
//! - Schema type tags (`ValueType`) with zero values for blank documents
//! - Text coercion between edited cell text and typed JSON values
//! - Document decoding/encoding (the decode operation consumed by the core)
//! - Cross-cutting error types

pub mod coerce;
pub mod document;
pub mod errors;
pub mod row;
pub mod value_type;

pub use coerce::{CoercionError, coerce_text, display_text, parse_array_text, validate_text};
pub use document::{DecodeError, decode, decode_object, decode_str, write_document};
pub use errors::CoreError;
pub use row::{Cell, Column, Record, Row};
pub use value_type::ValueType;
