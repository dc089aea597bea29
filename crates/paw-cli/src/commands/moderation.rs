use paw_core::responses::Reply;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TargetArgs;
use crate::context::AppContext;
use crate::output::output;

fn warn_if_disabled(ctx: &AppContext) {
    if !ctx.config.moderation.is_enabled() {
        tracing::warn!("moderation is disabled (moderation.admin_user_id = 0); admin commands will be refused");
    }
}

/// Handle `pawpoints pending`.
pub async fn pending(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    warn_if_disabled(ctx);
    let points = ctx.bot.list_pending(&flags.identity()).await?;
    output(&Reply::Pending { points }, flags.format)
}

/// Handle `pawpoints approve`.
pub async fn approve(args: &TargetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    warn_if_disabled(ctx);
    let point = ctx.bot.approve(&flags.identity(), &args.id).await?;
    output(&Reply::Moderated { point }, flags.format)
}

/// Handle `pawpoints reject`.
pub async fn reject(args: &TargetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    warn_if_disabled(ctx);
    let point = ctx.bot.reject(&flags.identity(), &args.id).await?;
    output(&Reply::Moderated { point }, flags.format)
}

/// Handle `pawpoints stats`.
pub async fn stats(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    warn_if_disabled(ctx);
    let stats = ctx.bot.stats(&flags.identity()).await?;
    output(&Reply::Stats { stats }, flags.format)
}
