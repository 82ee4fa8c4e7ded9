//! Last-used locations, remembered between runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_schema_name() -> String {
    "default.json".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    /// Directory most recently indexed or searched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_dir: Option<PathBuf>,

    /// Schema file name, relative to the schemas directory.
    #[serde(default = "default_schema_name")]
    pub last_schema: String,

    /// Document most recently shown or edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_document: Option<PathBuf>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            last_dir: None,
            last_schema: default_schema_name(),
            last_document: None,
        }
    }
}

impl Session {
    /// Read the session at `path`. A missing file yields the default session.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file exists but cannot be read,
    /// [`ConfigError::Deserialize`] if it is not a valid session.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no session file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Write the session to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] or [`ConfigError::Io`].
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let session = Session::load(&tmp.path().join("session.toml")).unwrap();
        assert_eq!(session, Session::default());
        assert_eq!(session.last_schema, "default.json");
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("state").join("session.toml");
        let session = Session {
            last_dir: Some(PathBuf::from("/data/docs")),
            last_schema: "instrument.json".into(),
            last_document: None,
        };
        session.save(&path).unwrap();
        assert_eq!(Session::load(&path).unwrap(), session);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.toml");
        fs::write(&path, "last_schema = [").unwrap();
        assert!(matches!(
            Session::load(&path),
            Err(ConfigError::Deserialize(_))
        ));
    }
}
