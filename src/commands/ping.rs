use crate::features::router::Invocation;
use crate::{Context, Error};

/// Check bot status
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    super::respond(ctx, Invocation::Ping).await
}
