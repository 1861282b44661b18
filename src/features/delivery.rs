// Outbound delivery to Discord channels

use poise::async_trait;
use poise::serenity_prelude as serenity;
use thiserror::Error;

use crate::features::renderer::MessagePayload;

/// Why a message could not be delivered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("channel {channel_id} is unavailable: {reason}")]
    ChannelUnavailable { channel_id: String, reason: String },
    #[error("sending to channel {channel_id} failed: {reason}")]
    Rejected { channel_id: String, reason: String },
}

/// A channel that was resolved and can be sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTarget {
    pub channel_id: String,
}

/// Outbound collaborator used by the dispatcher and the command router
#[async_trait]
pub trait Courier: Send + Sync {
    /// Best-effort lookup of a channel belonging to `guild_id`
    async fn resolve_channel(&self, guild_id: &str, channel_id: &str) -> Result<ChannelTarget, DeliveryError>;

    async fn send(&self, target: &ChannelTarget, payload: &MessagePayload) -> Result<(), DeliveryError>;
}

/// Courier backed by a live serenity context
pub struct SerenityCourier<'a> {
    ctx: &'a serenity::Context,
}

impl<'a> SerenityCourier<'a> {
    pub fn new(ctx: &'a serenity::Context) -> Self {
        Self { ctx }
    }
}

fn parse_channel_id(channel_id: &str) -> Result<serenity::ChannelId, DeliveryError> {
    channel_id
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(serenity::ChannelId::new)
        .ok_or_else(|| DeliveryError::ChannelUnavailable {
            channel_id: channel_id.to_string(),
            reason: "not a channel id".to_string(),
        })
}

#[async_trait]
impl Courier for SerenityCourier<'_> {
    async fn resolve_channel(&self, guild_id: &str, channel_id: &str) -> Result<ChannelTarget, DeliveryError> {
        let id = parse_channel_id(channel_id)?;
        let unavailable = |reason: String| DeliveryError::ChannelUnavailable {
            channel_id: channel_id.to_string(),
            reason,
        };

        let channel = id
            .to_channel(self.ctx)
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        match channel.guild() {
            Some(channel) if channel.guild_id.to_string() == guild_id => Ok(ChannelTarget {
                channel_id: channel_id.to_string(),
            }),
            Some(_) => Err(unavailable(format!("not part of guild {}", guild_id))),
            None => Err(unavailable("not a guild channel".to_string())),
        }
    }

    async fn send(&self, target: &ChannelTarget, payload: &MessagePayload) -> Result<(), DeliveryError> {
        let id = parse_channel_id(&target.channel_id)?;

        id.send_message(self.ctx, serenity::CreateMessage::new().embed(payload.to_embed()))
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::Rejected {
                channel_id: target.channel_id.clone(),
                reason: e.to_string(),
            })
    }
}
