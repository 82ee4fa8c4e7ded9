use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Blank(args) => commands::blank::handle(args, ctx, flags),
        Commands::Show(args) => commands::show::handle(args, ctx, flags),
        Commands::Validate(args) => commands::validate::handle(args, ctx, flags),
        Commands::Set(args) => commands::set::handle(args, ctx, flags),
        Commands::Schema { action } => commands::schema::handle(action, ctx, flags),
        Commands::Default { action } => commands::defaults::handle(action, ctx, flags),
        Commands::Index { action } => commands::index::handle(action, ctx, flags),
        Commands::Search { action } => commands::search::handle(action, ctx, flags),
    }
}
