pub mod defaults;
pub mod index;
pub mod schema;
pub mod search;

pub use defaults::DefaultCommands;
pub use index::IndexCommands;
pub use schema::SchemaCommands;
pub use search::SearchCommands;
