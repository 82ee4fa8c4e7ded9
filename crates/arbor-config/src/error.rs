//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// Reading or writing a configuration or session file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session could not be written as TOML.
    #[error("Cannot serialize session: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A session file exists but is not valid TOML.
    #[error("Cannot parse session: {0}")]
    Deserialize(#[from] toml::de::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
