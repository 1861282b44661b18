// Slash command adapters
// Each command turns its poise arguments into a typed `Invocation` for the router

pub mod announce;
pub mod greeting;
pub mod ping;

use crate::features::delivery::SerenityCourier;
use crate::features::router::{self, Invocation};
use crate::{Context, Error};

/// Route an invocation and send its reply
async fn respond(ctx: Context<'_>, invocation: Invocation) -> Result<(), Error> {
    let courier = SerenityCourier::new(ctx.serenity_context());
    let reply = router::handle(&ctx.data().store, &courier, invocation).await;
    ctx.say(reply).await?;
    Ok(())
}

/// Guild id of the invocation, as stored in the config document
fn guild_key(ctx: Context<'_>) -> Option<String> {
    ctx.guild_id().map(|id| id.to_string())
}
