use std::path::PathBuf;

use clap::Subcommand;

/// Search commands over an indexed directory.
#[derive(Clone, Debug, Subcommand)]
pub enum SearchCommands {
    /// Find documents matching every `key=text` or bare `text` term.
    Values {
        /// Search terms.
        #[arg(required = true)]
        terms: Vec<String>,
        /// Treat term text as regular expressions instead of literal text.
        #[arg(long)]
        regex: bool,
        /// Indexed directory (defaults to the last one used).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Find documents valid against a stored schema.
    Schema {
        /// Stored schema name (defaults to the last one used).
        #[arg(long)]
        schema: Option<String>,
        /// Indexed directory (defaults to the last one used).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}
