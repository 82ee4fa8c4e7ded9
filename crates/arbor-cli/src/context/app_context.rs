use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use arbor_config::{ArborConfig, Session};
use arbor_schema::SchemaStore;
use arbor_search::IndexStore;
use serde_json::Value;

use crate::cli::GlobalFlags;

/// Configuration and session state shared by every command.
pub struct AppContext {
    pub config: ArborConfig,
    pub session: Session,
    session_path: PathBuf,
}

impl AppContext {
    /// Load configuration, apply `--data-dir`, and restore the last session.
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let mut config = ArborConfig::load_with_dotenv().context("failed to load configuration")?;
        if let Some(data_dir) = &flags.data_dir {
            config.storage.data_dir.clone_from(data_dir);
        }
        config
            .storage
            .ensure_dirs()
            .with_context(|| {
                format!(
                    "failed to create data directory {}",
                    config.storage.data_dir.display()
                )
            })?;

        let session_path = config.storage.session_path();
        let session = Session::load(&session_path).unwrap_or_else(|error| {
            tracing::warn!(%error, "session file unreadable, starting a new session");
            Session::default()
        });

        Ok(Self {
            config,
            session,
            session_path,
        })
    }

    /// Persist the session. Failures are logged, never fatal.
    pub fn save_session(&self) {
        if let Err(error) = self.session.save(&self.session_path) {
            tracing::warn!(%error, "failed to save session");
        }
    }

    pub fn schema_store(&self) -> anyhow::Result<SchemaStore> {
        SchemaStore::open(
            self.config.storage.schemas_dir(),
            self.config.storage.defaults_dir(),
        )
        .context("failed to open schema storage")
    }

    pub fn index_store(&self) -> anyhow::Result<IndexStore> {
        IndexStore::open(
            self.config.storage.indexes_dir(),
            self.config.search.document_glob.clone(),
        )
        .context("failed to open index storage")
    }

    /// Schema name to use: the explicit one, remembered for next time, or
    /// the last one used.
    pub fn schema_name(&mut self, explicit: Option<&str>) -> String {
        if let Some(name) = explicit {
            name.clone_into(&mut self.session.last_schema);
        }
        self.session.last_schema.clone()
    }

    /// Load the schema named by [`AppContext::schema_name`].
    pub fn load_schema(&mut self, explicit: Option<&str>) -> anyhow::Result<(String, Value)> {
        let name = self.schema_name(explicit);
        let schema = self
            .schema_store()?
            .load(&name)
            .with_context(|| format!("failed to load schema '{name}'"))?;
        Ok((name, schema))
    }

    /// Directory to search: the explicit one, or the last one indexed.
    pub fn search_dir(&mut self, explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
        if let Some(dir) = explicit {
            self.session.last_dir = Some(dir.to_path_buf());
            return Ok(dir.to_path_buf());
        }
        match &self.session.last_dir {
            Some(dir) => Ok(dir.clone()),
            None => bail!("no directory given and none indexed yet. Run 'arbor index build <dir>' first."),
        }
    }

    pub fn remember_document(&mut self, document: &Path) {
        self.session.last_document = Some(document.to_path_buf());
    }
}
