//! Document decoding and encoding.
//!
//! The core never parses documents by hand: it consumes `serde_json::Value`
//! trees. Decoding keeps object key order (`preserve_order`), which the
//! materializer relies on to lay rows out in document order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::errors::CoreError;

/// Why a document could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file is missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but its top level is not an object.
    #[error("{} does not contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },
}

impl DecodeError {
    /// True when the failure is an I/O problem rather than bad content.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Read and parse a JSON document.
///
/// A leading UTF-8 byte order mark is ignored.
///
/// # Errors
///
/// Returns [`DecodeError::Io`] if the file cannot be read and
/// [`DecodeError::Parse`] if its content is not JSON.
pub fn decode(path: &Path) -> Result<Value, DecodeError> {
    tracing::debug!(path = %path.display(), "decoding document");
    let text = fs::read_to_string(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_str(&text).map_err(|source| DecodeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON document whose top level must be an object.
///
/// # Errors
///
/// Same as [`decode`], plus [`DecodeError::NotAnObject`].
pub fn decode_object(path: &Path) -> Result<Map<String, Value>, DecodeError> {
    match decode(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Parse in-memory JSON text.
///
/// # Errors
///
/// Returns the parser error for malformed text.
pub fn decode_str(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text.trim_start_matches('\u{feff}'))
}

/// Write a document as pretty JSON with a four-space indent.
///
/// # Errors
///
/// Returns [`CoreError::Io`] or [`CoreError::Json`] on failure.
pub fn write_document(path: &Path, value: &Value) -> Result<(), CoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    fs::write(path, buf)?;
    tracing::debug!(path = %path.display(), "document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decode_keeps_key_order() {
        let value = decode_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).expect("parse");
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn decode_ignores_bom() {
        let value = decode_str("\u{feff}{\"a\": true}").expect("parse");
        assert_eq!(value, json!({"a": true}));
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let error = decode(&tmp.path().join("absent.json")).unwrap_err();
        assert!(error.is_io());
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let error = decode(&path).unwrap_err();
        assert!(matches!(error, DecodeError::Parse { .. }));
    }

    #[test]
    fn array_top_level_is_not_an_object() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("list.json");
        fs::write(&path, "[1, 2]").unwrap();
        let error = decode_object(&path).unwrap_err();
        assert!(matches!(error, DecodeError::NotAnObject { .. }));
    }

    #[test]
    fn write_then_decode() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doc.json");
        let value = json!({"b": [1, 2], "a": {"nested": "x"}});
        write_document(&path, &value).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"b\""));
        assert_eq!(decode(&path).unwrap(), value);
    }
}
