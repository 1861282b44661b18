// Gateway event handler
// Adapts serenity events into membership events for the greeter

use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::info;

use crate::features::delivery::SerenityCourier;
use crate::features::greeter::{self, MemberEvent};
use crate::{Data, Error};

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Logged in as {}", data_about_bot.user.tag());
            data.status.set_guild_count(data_about_bot.guilds.len());
        }
        serenity::FullEvent::GuildCreate { .. } | serenity::FullEvent::GuildDelete { .. } => {
            data.status.set_guild_count(ctx.cache.guild_count());
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            let event = MemberEvent {
                guild_id: new_member.guild_id.to_string(),
                guild_name: guild_name(ctx, new_member.guild_id).await,
                user: new_member.user.mention().to_string(),
                avatar_url: Some(new_member.user.face()),
            };
            greeter::member_joined(&data.store, &SerenityCourier::new(ctx), &event).await;
        }
        serenity::FullEvent::GuildMemberRemoval { guild_id, user, .. } => {
            let event = MemberEvent {
                guild_id: guild_id.to_string(),
                guild_name: guild_name(ctx, *guild_id).await,
                user: user.tag(),
                avatar_url: None,
            };
            greeter::member_left(&data.store, &SerenityCourier::new(ctx), &event).await;
        }
        _ => {}
    }

    Ok(())
}

/// Display name of a guild: cache first, then HTTP, then the raw id
async fn guild_name(ctx: &serenity::Context, guild_id: serenity::GuildId) -> String {
    if let Some(name) = guild_id.name(&ctx.cache) {
        return name;
    }

    match guild_id.to_partial_guild(ctx).await {
        Ok(guild) => guild.name,
        Err(_) => guild_id.to_string(),
    }
}
