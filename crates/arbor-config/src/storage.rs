//! Storage locations.
//!
//! Everything arbor persists lives under one data directory:
//! `schemas/`, `defaults/`, `indexes/`, and `session.toml`.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".arbor"), |dir| dir.join("arbor"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn schemas_dir(&self) -> PathBuf {
        self.data_dir.join("schemas")
    }

    #[must_use]
    pub fn defaults_dir(&self) -> PathBuf {
        self.data_dir.join("defaults")
    }

    #[must_use]
    pub fn indexes_dir(&self) -> PathBuf {
        self.data_dir.join("indexes")
    }

    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.toml")
    }

    /// Create the data directory and its subdirectories.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        for dir in [self.schemas_dir(), self.defaults_dir(), self.indexes_dir()] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for an empty data directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.data_dir".into(),
                reason: "path must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_under_data_dir() {
        let storage = StorageConfig {
            data_dir: PathBuf::from("/srv/arbor"),
        };
        assert_eq!(storage.schemas_dir(), PathBuf::from("/srv/arbor/schemas"));
        assert_eq!(storage.indexes_dir(), PathBuf::from("/srv/arbor/indexes"));
        assert_eq!(storage.session_path(), PathBuf::from("/srv/arbor/session.toml"));
    }

    #[test]
    fn ensure_dirs_creates_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = StorageConfig {
            data_dir: tmp.path().join("data"),
        };
        storage.ensure_dirs().unwrap();
        assert!(storage.schemas_dir().is_dir());
        assert!(storage.defaults_dir().is_dir());
        assert!(storage.indexes_dir().is_dir());
    }

    #[test]
    fn empty_data_dir_is_invalid() {
        let storage = StorageConfig {
            data_dir: PathBuf::new(),
        };
        assert!(matches!(
            storage.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
