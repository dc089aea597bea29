use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Chat => commands::chat::handle(ctx).await,
        Commands::List => commands::points::list(ctx, flags).await,
        Commands::Nearest(args) => commands::points::nearest(&args, ctx, flags).await,
        Commands::Mine => commands::points::mine(ctx, flags).await,
        Commands::Map => commands::points::map(ctx, flags).await,
        Commands::Delete(args) => commands::points::delete(&args, ctx, flags).await,
        Commands::Edit(args) => commands::points::edit(args, ctx, flags).await,
        Commands::Pending => commands::moderation::pending(ctx, flags).await,
        Commands::Approve(args) => commands::moderation::approve(&args, ctx, flags).await,
        Commands::Reject(args) => commands::moderation::reject(&args, ctx, flags).await,
        Commands::Stats => commands::moderation::stats(ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
