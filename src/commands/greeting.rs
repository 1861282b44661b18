// Welcome / goodbye configuration commands

use poise::serenity_prelude as serenity;

use crate::features::router::{Invocation, TemplateArgs};
use crate::models::guild::EventKind;
use crate::{Context, Error};

/// Set welcome message
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn setwelcome(
    ctx: Context<'_>,
    #[description = "Welcome channel"] channel: serenity::Channel,
    #[description = "Welcome message, supports {user} and {server}"] message: String,
    #[description = "HEX color (ex: #00ff99)"] color: Option<String>,
    #[description = "GIF or image URL"] gif: Option<String>,
) -> Result<(), Error> {
    set_template(ctx, EventKind::Welcome, channel, message, color, gif).await
}

/// Set goodbye message
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
pub async fn setgoodbye(
    ctx: Context<'_>,
    #[description = "Goodbye channel"] channel: serenity::Channel,
    #[description = "Goodbye message, supports {user} and {server}"] message: String,
    #[description = "HEX color"] color: Option<String>,
    #[description = "GIF or image URL"] gif: Option<String>,
) -> Result<(), Error> {
    set_template(ctx, EventKind::Goodbye, channel, message, color, gif).await
}

async fn set_template(
    ctx: Context<'_>,
    kind: EventKind,
    channel: serenity::Channel,
    message: String,
    color: Option<String>,
    gif: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = super::guild_key(ctx) else {
        ctx.say("This command can only be used in a server.").await?;
        return Ok(());
    };

    let invocation = Invocation::SetTemplate {
        guild_id,
        kind,
        args: TemplateArgs {
            channel_id: channel.id().to_string(),
            message,
            color,
            gif,
        },
    };

    super::respond(ctx, invocation).await
}
