use std::path::PathBuf;

use clap::Subcommand;

/// Default document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DefaultCommands {
    /// Store a document as the default of a schema.
    Save {
        /// Document to store.
        document: PathBuf,
        /// Stored schema name (defaults to the last one used).
        #[arg(long)]
        schema: Option<String>,
    },
    /// Print or write the default document of a schema.
    Load {
        /// Stored schema name (defaults to the last one used).
        #[arg(long)]
        schema: Option<String>,
        /// Write the document here instead of printing it.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
