use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Caps(args) => commands::caps::handle(args, ctx, flags),
        Commands::Access(args) => commands::access::handle(args, ctx, flags),
        Commands::Transition(args) => commands::transition::handle(args, ctx, flags),
        Commands::Next(args) => commands::next::handle(args, ctx, flags),
        Commands::Timeline(args) => commands::timeline::handle(args, ctx, flags),
        Commands::Inspect(args) => commands::inspect::handle(args, ctx, flags),
        Commands::Audit(args) => commands::audit::handle(args, ctx, flags),
        Commands::Schema(args) => commands::schema::handle(args, ctx, flags),
        Commands::Config => commands::config::handle(ctx, flags),
    }
}
