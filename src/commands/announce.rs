use poise::serenity_prelude as serenity;

use crate::features::router::{AnnounceArgs, Invocation};
use crate::{Context, Error};

/// Send a styled announcement to a channel
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn announce(
    ctx: Context<'_>,
    #[description = "Channel to post in"] channel: serenity::Channel,
    #[description = "Announcement title"] title: String,
    #[description = "Announcement text"] description: String,
    #[description = "HEX color (ex: #5865f2)"] color: Option<String>,
    #[description = "Image URL"] image: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = super::guild_key(ctx) else {
        ctx.say("This command can only be used in a server.").await?;
        return Ok(());
    };

    // Resolving the channel and sending can take longer than the interaction window
    ctx.defer().await?;

    let invocation = Invocation::Announce {
        guild_id,
        args: AnnounceArgs {
            channel_id: channel.id().to_string(),
            title,
            description,
            color,
            image,
        },
    };

    super::respond(ctx, invocation).await
}
