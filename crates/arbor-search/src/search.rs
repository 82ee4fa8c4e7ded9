//! Filtering indexed documents.

use std::path::{Path, PathBuf};

use arbor_core::decode;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SearchError;
use crate::flatten::flatten_for_search;

/// One value search term.
///
/// With a key, the flattened document must hold a non-empty value under
/// exactly that key and the value must match. Without one, any non-empty
/// value may match.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    key: Option<String>,
    pattern: Regex,
}

impl SearchQuery {
    /// Query with a regular expression.
    ///
    /// # Errors
    ///
    /// [`SearchError::Pattern`] when `pattern` is not a valid regex.
    pub fn new(key: Option<String>, pattern: &str) -> Result<Self, SearchError> {
        Ok(Self {
            key: key.filter(|key| !key.is_empty()),
            pattern: Regex::new(pattern)?,
        })
    }

    /// Query matching `text` literally anywhere in a value.
    ///
    /// # Errors
    ///
    /// Same as [`SearchQuery::new`].
    pub fn literal(key: Option<String>, text: &str) -> Result<Self, SearchError> {
        Self::new(key, &regex::escape(text))
    }

    /// Parse `key=pattern`, or a bare `pattern` that searches every key.
    ///
    /// # Errors
    ///
    /// Same as [`SearchQuery::new`].
    pub fn parse(term: &str) -> Result<Self, SearchError> {
        match term.split_once('=') {
            Some((key, pattern)) => Self::new(Some(key.trim().to_string()), pattern),
            None => Self::new(None, term),
        }
    }

    /// Parse `key=text` or a bare `text`, matching the text literally.
    ///
    /// # Errors
    ///
    /// Same as [`SearchQuery::new`].
    pub fn parse_literal(term: &str) -> Result<Self, SearchError> {
        match term.split_once('=') {
            Some((key, text)) => Self::literal(Some(key.trim().to_string()), text),
            None => Self::literal(None, term),
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn matches(&self, flat: &Map<String, Value>) -> bool {
        match self.key.as_deref() {
            Some(key) => flat
                .get(key)
                .is_some_and(|value| self.pattern.is_match(&value_text(value))),
            None => flat
                .values()
                .any(|value| self.pattern.is_match(&value_text(value))),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn read_document(path: &Path) -> Option<Value> {
    match decode(path) {
        Ok(Value::Null) => {
            tracing::error!(path = %path.display(), "document is null, skipping");
            None
        }
        Ok(document) => Some(document),
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "cannot read document, skipping");
            None
        }
    }
}

/// Files in which every query finds a matching value, in input order.
///
/// Empty string values never match. Unreadable and unparseable files are
/// logged and skipped.
#[must_use]
pub fn value_search(files: &[PathBuf], queries: &[SearchQuery]) -> Vec<PathBuf> {
    let mut hits = Vec::new();
    for path in files {
        let Some(document) = read_document(path) else {
            continue;
        };
        let mut flat = flatten_for_search(&document);
        flat.retain(|_, value| value.as_str() != Some(""));
        if queries.iter().all(|query| query.matches(&flat)) {
            tracing::debug!(path = %path.display(), "value search hit");
            hits.push(path.clone());
        }
    }
    tracing::info!(searched = files.len(), hits = hits.len(), "value search finished");
    hits
}

/// Files that validate against `schema`, in input order.
///
/// Unreadable files are logged and skipped; files that do not validate are
/// dropped.
///
/// # Errors
///
/// [`SearchError::SchemaInvalid`] when the schema itself is invalid. No file
/// is matched in that case.
pub fn schema_matching_search(
    files: &[PathBuf],
    schema: &Value,
) -> Result<Vec<PathBuf>, SearchError> {
    let validator = jsonschema::validator_for(schema).map_err(|error| {
        tracing::error!(%error, "schema does not conform to its meta-schema");
        SearchError::SchemaInvalid(error.to_string())
    })?;

    let mut kept = Vec::new();
    for path in files {
        let Some(document) = read_document(path) else {
            continue;
        };
        if validator.is_valid(&document) {
            kept.push(path.clone());
        } else {
            tracing::info!(path = %path.display(), "document not valid against schema");
        }
    }
    Ok(kept)
}
