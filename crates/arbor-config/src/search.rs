//! Search and indexing configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_document_glob() -> String {
    "*.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// File-name pattern of documents picked up by the indexer.
    #[serde(default = "default_document_glob")]
    pub document_glob: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            document_glob: default_document_glob(),
        }
    }
}

impl SearchConfig {
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for an empty pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.document_glob.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "search.document_glob".into(),
                reason: "pattern must not be empty".into(),
            });
        }
        Ok(())
    }
}
