//! On-disk schema storage.
//!
//! Schemas are kept as `<schemas_dir>/<name>.json`. A default document per
//! schema can be saved under `<defaults_dir>/<name>` using the same file name,
//! and is loaded back in place of a blank document.

use std::fs;
use std::path::{Path, PathBuf};

use arbor_core::{decode, write_document};
use serde_json::{Value, json};

use crate::error::SchemaError;

/// File name of the built-in example schema.
pub const DEFAULT_SCHEMA_NAME: &str = "default.json";

/// Schema and default-document storage rooted at two directories.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    schemas_dir: PathBuf,
    defaults_dir: PathBuf,
}

impl SchemaStore {
    /// Open storage, creating both directories when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if a directory cannot be created.
    pub fn open(
        schemas_dir: impl Into<PathBuf>,
        defaults_dir: impl Into<PathBuf>,
    ) -> Result<Self, SchemaError> {
        let store = Self {
            schemas_dir: schemas_dir.into(),
            defaults_dir: defaults_dir.into(),
        };
        fs::create_dir_all(&store.schemas_dir)?;
        fs::create_dir_all(&store.defaults_dir)?;
        Ok(store)
    }

    #[must_use]
    pub fn schemas_dir(&self) -> &Path {
        &self.schemas_dir
    }

    #[must_use]
    pub fn defaults_dir(&self) -> &Path {
        &self.defaults_dir
    }

    /// Path a schema named `name` has in storage, whether or not it exists.
    #[must_use]
    pub fn schema_path(&self, name: &str) -> PathBuf {
        self.schemas_dir.join(name)
    }

    /// Write the built-in example schema as [`DEFAULT_SCHEMA_NAME`],
    /// replacing any previous copy.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Core`] if the file cannot be written.
    pub fn deploy_default_schema(&self) -> Result<PathBuf, SchemaError> {
        let path = self.schema_path(DEFAULT_SCHEMA_NAME);
        write_document(&path, &example_schema())?;
        tracing::info!(path = %path.display(), "default schema deployed");
        Ok(path)
    }

    /// Copy the schema at `source` into storage under its file name.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::AlreadyExists`] if storage already holds that name.
    /// - [`SchemaError::Decode`] if `source` is not a readable JSON document.
    pub fn add_schema(&self, source: &Path) -> Result<PathBuf, SchemaError> {
        let name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| SchemaError::InvalidName(source.to_path_buf()))?;
        let target = self.schema_path(name);
        if target.exists() {
            tracing::warn!(name, "schema already in storage, not overwriting");
            return Err(SchemaError::AlreadyExists(name.to_string()));
        }
        decode(source)?;
        fs::copy(source, &target)?;
        tracing::info!(name, "schema added to storage");
        Ok(target)
    }

    /// File names of all stored schemas, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if the directory cannot be listed.
    pub fn list(&self) -> Result<Vec<String>, SchemaError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.schemas_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if let (true, Some(name)) = (is_json, entry.file_name().to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load and parse a stored schema.
    ///
    /// # Errors
    ///
    /// [`SchemaError::NotFound`] for unknown names, [`SchemaError::Decode`]
    /// for unreadable files.
    pub fn load(&self, name: &str) -> Result<Value, SchemaError> {
        let path = self.schema_path(name);
        if !path.is_file() {
            return Err(SchemaError::NotFound {
                name: name.to_string(),
                dir: self.schemas_dir.clone(),
            });
        }
        Ok(decode(&path)?)
    }

    /// Store `document` as the default document of schema `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Core`] if the file cannot be written.
    pub fn save_default(&self, name: &str, document: &Value) -> Result<PathBuf, SchemaError> {
        let path = self.defaults_dir.join(name);
        write_document(&path, document)?;
        tracing::info!(schema = name, "default document saved");
        Ok(path)
    }

    /// Load the default document of schema `name`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::NotFound`] if no default was saved for `name`.
    pub fn load_default(&self, name: &str) -> Result<Value, SchemaError> {
        let path = self.defaults_dir.join(name);
        if !path.is_file() {
            return Err(SchemaError::NotFound {
                name: name.to_string(),
                dir: self.defaults_dir.clone(),
            });
        }
        Ok(decode(&path)?)
    }
}

fn example_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Blank Schema",
        "description": "Example schema deployed on first start. Use it to try things out.",
        "type": "object",
        "properties": {
            "general": {
                "title": "general",
                "description": "A plain text field.",
                "type": "string"
            },
            "hierarch": {
                "title": "hierarch",
                "description": "Anchor for the nested fields.",
                "type": "object",
                "properties": {
                    "Stage 1": {
                        "title": "Stage 1",
                        "description": "Add a schema to storage, then select it.",
                        "type": "string"
                    },
                    "Stage 2": {
                        "title": "Stage 2",
                        "description": "Generate a blank document, load a default, or open and validate a document.",
                        "type": "string"
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::blank_document;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store() -> (TempDir, SchemaStore) {
        let dir = TempDir::new().unwrap();
        let store = SchemaStore::open(dir.path().join("schemas"), dir.path().join("defaults"))
            .unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_directories() {
        let (_dir, store) = store();
        assert!(store.schemas_dir().is_dir());
        assert!(store.defaults_dir().is_dir());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn deployed_schema_walks() {
        let (_dir, store) = store();
        store.deploy_default_schema().unwrap();
        assert_eq!(store.list().unwrap(), vec![DEFAULT_SCHEMA_NAME]);

        let schema = store.load(DEFAULT_SCHEMA_NAME).unwrap();
        assert_eq!(
            blank_document(&schema).unwrap(),
            json!({"general": "", "hierarch": {"Stage 1": "", "Stage 2": ""}})
        );
    }

    #[test]
    fn add_schema_refuses_overwrite() {
        let (dir, store) = store();
        let source = dir.path().join("people.json");
        fs::write(&source, r#"{"properties": {}}"#).unwrap();

        let stored = store.add_schema(&source).unwrap();
        assert_eq!(stored, store.schema_path("people.json"));

        let again = store.add_schema(&source).unwrap_err();
        assert!(matches!(again, SchemaError::AlreadyExists(ref name) if name == "people.json"));
    }

    #[test]
    fn add_schema_rejects_non_json() {
        let (dir, store) = store();
        let source = dir.path().join("notes.json");
        fs::write(&source, "not json").unwrap();
        assert!(matches!(
            store.add_schema(&source),
            Err(SchemaError::Decode(_))
        ));
        assert!(!store.schema_path("notes.json").exists());
    }

    #[test]
    fn defaults_roundtrip() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load_default(DEFAULT_SCHEMA_NAME),
            Err(SchemaError::NotFound { .. })
        ));
        let doc = json!({"general": "hello"});
        store.save_default(DEFAULT_SCHEMA_NAME, &doc).unwrap();
        assert_eq!(store.load_default(DEFAULT_SCHEMA_NAME).unwrap(), doc);
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load("nope.json"),
            Err(SchemaError::NotFound { .. })
        ));
    }
}
