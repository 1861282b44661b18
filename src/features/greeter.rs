// Membership event dispatcher
// Renders the guild's welcome/goodbye template and sends it. Nothing here ever fails the caller.

use tracing::{debug, error, info, warn};

use crate::features::config_store::ConfigStore;
use crate::features::delivery::Courier;
use crate::features::renderer::{render, RenderContext};
use crate::models::guild::EventKind;

/// A member joined or left a guild
#[derive(Debug, Clone)]
pub struct MemberEvent {
    pub guild_id: String,
    pub guild_name: String,
    /// Mention for joins, durable tag for leaves
    pub user: String,
    pub avatar_url: Option<String>,
}

/// What happened to a membership event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    NotConfigured,
    ChannelUnavailable,
    SendFailed,
    Delivered,
}

pub async fn member_joined(store: &ConfigStore, courier: &dyn Courier, event: &MemberEvent) -> Dispatch {
    dispatch(store, courier, EventKind::Welcome, event).await
}

pub async fn member_left(store: &ConfigStore, courier: &dyn Courier, event: &MemberEvent) -> Dispatch {
    dispatch(store, courier, EventKind::Goodbye, event).await
}

async fn dispatch(store: &ConfigStore, courier: &dyn Courier, kind: EventKind, event: &MemberEvent) -> Dispatch {
    let Some(template) = store.template(&event.guild_id, kind) else {
        debug!("No {} template for guild {}", kind, event.guild_id);
        return Dispatch::NotConfigured;
    };

    let target = match courier.resolve_channel(&event.guild_id, &template.channel_id).await {
        Ok(target) => target,
        Err(e) => {
            warn!("Skipping {} for guild {}: {}", kind, event.guild_id, e);
            return Dispatch::ChannelUnavailable;
        }
    };

    let context = RenderContext {
        mention_or_tag: &event.user,
        guild_name: &event.guild_name,
        avatar_url: event.avatar_url.as_deref(),
    };
    let payload = render(&template, kind, &context);

    match courier.send(&target, &payload).await {
        Ok(()) => {
            info!("Sent {} message in guild {} to channel {}", kind, event.guild_id, target.channel_id);
            Dispatch::Delivered
        }
        Err(e) => {
            error!("Failed to send {} message for guild {}: {}", kind, event.guild_id, e);
            Dispatch::SendFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::config_store::testing::MemoryBackend;
    use crate::features::delivery::testing::RecordingCourier;
    use crate::models::guild::EventTemplate;

    fn store_with(kind: EventKind, template: EventTemplate) -> ConfigStore {
        let store = ConfigStore::open(MemoryBackend::default());
        store.set_template("G1", kind, template).unwrap();
        store
    }

    fn template(channel: &str, message: &str) -> EventTemplate {
        EventTemplate {
            channel_id: channel.to_string(),
            message_template: message.to_string(),
            color_hex: None,
            image_url: None,
        }
    }

    fn event(user: &str) -> MemberEvent {
        MemberEvent {
            guild_id: "G1".to_string(),
            guild_name: "Acme".to_string(),
            user: user.to_string(),
            avatar_url: Some("https://cdn.example.com/a.png".to_string()),
        }
    }

    #[tokio::test]
    async fn test_leave_without_goodbye_is_noop() {
        let store = store_with(EventKind::Welcome, template("C1", "hi"));
        let courier = RecordingCourier::default().with_channel("G1", "C1");

        let outcome = member_left(&store, &courier, &event("someone")).await;

        assert_eq!(outcome, Dispatch::NotConfigured);
        assert!(courier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_guild_is_noop() {
        let store = ConfigStore::open(MemoryBackend::default());
        let courier = RecordingCourier::default();

        let outcome = member_joined(&store, &courier, &event("<@1>")).await;

        assert_eq!(outcome, Dispatch::NotConfigured);
        assert!(courier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_unresolvable_channel_sends_nothing() {
        let store = store_with(EventKind::Welcome, template("deleted", "hi {user}"));
        let courier = RecordingCourier::default().with_channel("G1", "C1");

        let outcome = member_joined(&store, &courier, &event("<@1>")).await;

        assert_eq!(outcome, Dispatch::ChannelUnavailable);
        assert!(courier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_channel_from_other_guild_is_unavailable() {
        let store = store_with(EventKind::Welcome, template("C1", "hi"));
        let courier = RecordingCourier::default().with_channel("G2", "C1");

        let outcome = member_joined(&store, &courier, &event("<@1>")).await;
        assert_eq!(outcome, Dispatch::ChannelUnavailable);
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed() {
        let store = store_with(EventKind::Goodbye, template("C1", "bye {user}"));
        let courier = RecordingCourier::default().with_channel("G1", "C1").rejecting();

        let outcome = member_left(&store, &courier, &event("someone")).await;
        assert_eq!(outcome, Dispatch::SendFailed);
    }

    #[tokio::test]
    async fn test_join_renders_welcome() {
        let store = store_with(EventKind::Welcome, template("C1", "Hi {user}, welcome to {server}!"));
        let courier = RecordingCourier::default().with_channel("G1", "C1");

        let outcome = member_joined(&store, &courier, &event("<@123>")).await;

        assert_eq!(outcome, Dispatch::Delivered);
        let sent = courier.sent();
        assert_eq!(sent.len(), 1);
        let (channel, payload) = &sent[0];
        assert_eq!(channel, "C1");
        assert_eq!(payload.description, "Hi <@123>, welcome to Acme!");
        assert_eq!(payload.color, 0x00ff99);
        assert_eq!(payload.thumbnail.as_deref(), Some("https://cdn.example.com/a.png"));
    }

    #[tokio::test]
    async fn test_leave_uses_tag_and_no_thumbnail() {
        let store = store_with(EventKind::Goodbye, template("C2", "{user} left {server}"));
        let courier = RecordingCourier::default().with_channel("G1", "C2");

        member_left(&store, &courier, &event("someone#0042")).await;

        let sent = courier.sent();
        let (channel, payload) = &sent[0];
        assert_eq!(channel, "C2");
        assert_eq!(payload.description, "someone#0042 left Acme");
        assert_eq!(payload.thumbnail, None);
        assert_eq!(payload.color, 0xff5555);
    }
}
