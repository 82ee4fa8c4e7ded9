use std::path::PathBuf;

use clap::Subcommand;

/// Directory index commands.
#[derive(Clone, Debug, Subcommand)]
pub enum IndexCommands {
    /// Crawl a directory and store its document list.
    Build {
        /// Directory to index.
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Rebuild stale indexes; every indexed directory when none is given.
    Check {
        /// Directory to check.
        dir: Option<PathBuf>,
    },
    /// List indexed directories.
    List,
}
