use paw_core::entities::PointView;
use paw_core::geo::Coordinate;
use paw_core::responses::Reply;
use paw_core::updates::PointUpdate;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{EditArgs, NearestArgs, TargetArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pawpoints list`.
pub async fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let points = ctx.bot.list_approved().await?;
    output(&Reply::Points { points }, flags.format)
}

/// Handle `pawpoints nearest`.
pub async fn nearest(args: &NearestArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let origin = Coordinate::new(args.lat, args.lon)?;
    let points = ctx.bot.nearest(origin, args.limit).await?;
    output(&Reply::Nearby { origin, points }, flags.format)
}

/// Handle `pawpoints mine`.
pub async fn mine(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let points = ctx.bot.list_mine(&flags.identity()).await?;
    output(&Reply::Mine { points }, flags.format)
}

/// Handle `pawpoints map`.
pub async fn map(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let views: Vec<PointView> = ctx
        .bot
        .list_approved()
        .await?
        .iter()
        .map(paw_core::entities::PointRecord::view)
        .collect();
    output(&views, flags.format)
}

/// Handle `pawpoints delete`.
pub async fn delete(args: &TargetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let deleted = ctx.bot.delete(&flags.identity(), &args.id).await?;
    output(&Reply::Deleted { id: deleted.id }, flags.format)
}

/// Handle `pawpoints edit`.
pub async fn edit(args: EditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let update = PointUpdate {
        description: args.description,
        schedule: args.schedule,
        photo_ref: args.photo,
        ..PointUpdate::default()
    };
    let point = ctx.bot.edit(&flags.identity(), &args.id, update).await?;
    output(&Reply::Updated { point }, flags.format)
}
