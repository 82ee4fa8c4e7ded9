use std::path::PathBuf;

use clap::Subcommand;

/// Schema storage commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SchemaCommands {
    /// Deploy the built-in example schema.
    Init,
    /// Copy a schema file into storage.
    Add {
        /// Schema file to copy.
        source: PathBuf,
    },
    /// List stored schemas.
    List,
}
