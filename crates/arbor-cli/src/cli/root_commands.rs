use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{DefaultCommands, IndexCommands, SchemaCommands, SearchCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print or write a blank document for a schema.
    Blank(BlankArgs),
    /// Show a document as annotated rows, flagging keys the schema does not expect.
    Show(ShowArgs),
    /// Validate a document against a schema.
    Validate(ValidateArgs),
    /// Edit one value of a document, checked against its declared type.
    Set(SetArgs),
    /// Schema storage.
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
    /// Per-schema default documents.
    Default {
        #[command(subcommand)]
        action: DefaultCommands,
    },
    /// Directory indexes.
    Index {
        #[command(subcommand)]
        action: IndexCommands,
    },
    /// Search indexed documents.
    Search {
        #[command(subcommand)]
        action: SearchCommands,
    },
}

/// Arguments for `arbor blank`.
#[derive(Clone, Debug, Args)]
pub struct BlankArgs {
    /// Stored schema name (defaults to the last one used).
    #[arg(long)]
    pub schema: Option<String>,
    /// Write the document here instead of printing it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `arbor show`.
#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Document to show.
    pub document: PathBuf,
    /// Stored schema name (defaults to the last one used).
    #[arg(long)]
    pub schema: Option<String>,
    /// Print the raw row dump instead of formatted output.
    #[arg(long)]
    pub dump: bool,
}

/// Arguments for `arbor validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Document to validate.
    pub document: PathBuf,
    /// Stored schema name (defaults to the last one used).
    #[arg(long)]
    pub schema: Option<String>,
}

/// Arguments for `arbor set`.
#[derive(Clone, Debug, Args)]
pub struct SetArgs {
    /// Document to edit.
    pub document: PathBuf,
    /// Slash-separated key path, e.g. `general/count`.
    pub key_path: String,
    /// New value text.
    pub value: String,
    /// Stored schema name (defaults to the last one used).
    #[arg(long)]
    pub schema: Option<String>,
    /// Write the edited document here instead of in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
