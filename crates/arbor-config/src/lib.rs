//! # arbor-config
//!
//! Layered configuration for arbor using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`ARBOR_*` prefix, `__` separates sections)
//! 2. Project-level `.arbor/config.toml`
//! 3. User-level `~/.config/arbor/config.toml`
//! 4. Built-in defaults
//!
//! `ARBOR_STORAGE__DATA_DIR` maps to `storage.data_dir`,
//! `ARBOR_SEARCH__DOCUMENT_GLOB` to `search.document_glob`.

mod error;
mod general;
mod search;
mod session;
mod storage;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use search::SearchConfig;
pub use session::Session;
pub use storage::StorageConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArborConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl ArborConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] when a source cannot be read or has the wrong
    /// shape, [`ConfigError::InvalidValue`] when a field fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`ArborConfig::load`], after reading a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Same as [`ArborConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(error) if error.not_found() => {}
            Err(error) => tracing::warn!(%error, "cannot read .env"),
        }
        Self::load()
    }

    /// The provider chain, exposed so tests can layer more on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".arbor/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ARBOR_").split("__"))
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.validate()?;
        self.search.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("arbor").join("config.toml"))
    }
}
