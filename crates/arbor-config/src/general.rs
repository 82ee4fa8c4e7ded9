//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Log at debug level unless `ARBOR_LOG` says otherwise.
    #[serde(default)]
    pub verbose_logging: bool,

    /// Highlight `KeyError`/`ValueError` rows when showing a document.
    #[serde(default = "default_true")]
    pub show_error_representation: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose_logging: false,
            show_error_representation: default_true(),
        }
    }
}
