// Administrative command router
// Commands arrive as typed invocations built by the slash command adapters in `commands/`

use anyhow::Result;
use tracing::{error, info};

use crate::features::config_store::ConfigStore;
use crate::features::delivery::Courier;
use crate::features::renderer::render_announcement;
use crate::models::guild::{EventKind, EventTemplate};
use crate::utils::color::normalize_image;
use crate::utils::config::replies;

/// Arguments of `/setwelcome` and `/setgoodbye`
#[derive(Debug, Clone)]
pub struct TemplateArgs {
    pub channel_id: String,
    pub message: String,
    pub color: Option<String>,
    pub gif: Option<String>,
}

/// Arguments of `/announce`
#[derive(Debug, Clone)]
pub struct AnnounceArgs {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub color: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Invocation {
    Ping,
    SetTemplate {
        guild_id: String,
        kind: EventKind,
        args: TemplateArgs,
    },
    Announce {
        guild_id: String,
        args: AnnounceArgs,
    },
}

impl Invocation {
    pub fn name(&self) -> &'static str {
        match self {
            Invocation::Ping => "ping",
            Invocation::SetTemplate { kind: EventKind::Welcome, .. } => "setwelcome",
            Invocation::SetTemplate { kind: EventKind::Goodbye, .. } => "setgoodbye",
            Invocation::Announce { .. } => "announce",
        }
    }
}

/// Run an invocation and return the reply text.
///
/// Errors are logged here and turned into the generic safe-failure reply.
pub async fn handle(store: &ConfigStore, courier: &dyn Courier, invocation: Invocation) -> String {
    let name = invocation.name();

    match execute(store, courier, invocation).await {
        Ok(reply) => reply.to_string(),
        Err(e) => {
            error!("Command /{} failed: {:?}", name, e);
            replies::SAFE_FAILURE.to_string()
        }
    }
}

async fn execute(store: &ConfigStore, courier: &dyn Courier, invocation: Invocation) -> Result<&'static str> {
    match invocation {
        Invocation::Ping => Ok(replies::ONLINE),
        Invocation::SetTemplate { guild_id, kind, args } => {
            let template = EventTemplate {
                channel_id: args.channel_id,
                message_template: args.message,
                color_hex: args.color,
                image_url: normalize_image(args.gif.as_deref()),
            };
            store.set_template(&guild_id, kind, template)?;

            Ok(match kind {
                EventKind::Welcome => replies::WELCOME_SET,
                EventKind::Goodbye => replies::GOODBYE_SET,
            })
        }
        Invocation::Announce { guild_id, args } => {
            let target = courier.resolve_channel(&guild_id, &args.channel_id).await?;
            let payload = render_announcement(
                &args.title,
                &args.description,
                args.color.as_deref(),
                args.image.as_deref(),
            );
            courier.send(&target, &payload).await?;

            info!("Announcement sent in guild {} to channel {}", guild_id, target.channel_id);
            Ok(replies::ANNOUNCED)
        }
    }
}
