// Message renderer
// Turns a template record plus live event data into an embed payload. No I/O.

use poise::serenity_prelude as serenity;
use serde::Serialize;

use crate::models::guild::{EventKind, EventTemplate};
use crate::utils::color::{normalize_color, normalize_image};
use crate::utils::config::colors;

pub const USER_TOKEN: &str = "{user}";
pub const SERVER_TOKEN: &str = "{server}";

/// Live data for one membership event
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// `<@id>` for joins, the durable user tag for leaves
    pub mention_or_tag: &'a str,
    pub guild_name: &'a str,
    pub avatar_url: Option<&'a str>,
}

/// Final outbound message; absent optional fields are omitted, not null
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MessagePayload {
    pub fn to_embed(&self) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::new()
            .title(&self.title)
            .description(&self.description)
            .color(self.color);

        if let Some(thumbnail) = &self.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }
        if let Some(image) = &self.image {
            embed = embed.image(image);
        }

        embed
    }
}

/// Replace every `{user}` and `{server}` token in a single left-to-right pass.
///
/// Substituted text is never rescanned, so a user name that itself contains
/// `{server}` comes through verbatim.
pub fn substitute_placeholders(template: &str, user: &str, server: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        if let Some(after) = tail.strip_prefix(USER_TOKEN) {
            out.push_str(user);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(SERVER_TOKEN) {
            out.push_str(server);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Render a stored template for a membership event.
///
/// Welcome carries the member avatar as thumbnail; goodbye never does.
pub fn render(template: &EventTemplate, kind: EventKind, context: &RenderContext<'_>) -> MessagePayload {
    let thumbnail = match kind {
        EventKind::Welcome => context.avatar_url.map(str::to_string),
        EventKind::Goodbye => None,
    };

    MessagePayload {
        title: kind.title().to_string(),
        description: substitute_placeholders(
            &template.message_template,
            context.mention_or_tag,
            context.guild_name,
        ),
        color: normalize_color(template.color_hex.as_deref(), kind.default_color()),
        thumbnail,
        image: normalize_image(template.image_url.as_deref()),
    }
}

/// Render a one-shot announcement. Text is used verbatim.
pub fn render_announcement(
    title: &str,
    description: &str,
    color: Option<&str>,
    image: Option<&str>,
) -> MessagePayload {
    MessagePayload {
        title: title.to_string(),
        description: description.to_string(),
        color: normalize_color(color, colors::ANNOUNCE_DEFAULT),
        thumbnail: None,
        image: normalize_image(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(message: &str) -> EventTemplate {
        EventTemplate {
            channel_id: "C1".to_string(),
            message_template: message.to_string(),
            color_hex: None,
            image_url: None,
        }
    }

    fn context<'a>(user: &'a str, avatar: Option<&'a str>) -> RenderContext<'a> {
        RenderContext {
            mention_or_tag: user,
            guild_name: "Acme",
            avatar_url: avatar,
        }
    }

    #[test]
    fn test_substitutes_both_tokens() {
        let payload = render(
            &template("Hi {user}, welcome to {server}!"),
            EventKind::Welcome,
            &context("<@123>", None),
        );
        assert_eq!(payload.description, "Hi <@123>, welcome to Acme!");
    }

    #[test]
    fn test_substitutes_every_occurrence() {
        assert_eq!(
            substitute_placeholders("{user}{user} @ {server}/{server}", "a", "B"),
            "aa @ B/B"
        );
    }

    #[test]
    fn test_substitution_is_single_pass() {
        assert_eq!(
            substitute_placeholders("{user} joined {server}", "{server}", "{user}"),
            "{server} joined {user}"
        );
    }

    #[test]
    fn test_leaves_other_braces_alone() {
        assert_eq!(
            substitute_placeholders("{{user}} {users} {serv", "x", "y"),
            "{x} {users} {serv"
        );
        assert_eq!(substitute_placeholders("no tokens", "x", "y"), "no tokens");
        assert_eq!(substitute_placeholders("ends with {", "x", "y"), "ends with {");
    }

    #[test]
    fn test_welcome_has_thumbnail_goodbye_never() {
        let avatar = Some("https://cdn.example.com/avatar.png");

        let welcome = render(&template("hi"), EventKind::Welcome, &context("<@1>", avatar));
        assert_eq!(welcome.title, "🎉 Welcome!");
        assert_eq!(welcome.thumbnail.as_deref(), avatar);

        let goodbye = render(&template("bye"), EventKind::Goodbye, &context("user#0001", avatar));
        assert_eq!(goodbye.title, "👋 Goodbye");
        assert_eq!(goodbye.thumbnail, None);
    }

    #[test]
    fn test_color_uses_kind_default() {
        let mut broken = template("hi");
        broken.color_hex = Some("nothex".to_string());

        let welcome = render(&broken, EventKind::Welcome, &context("<@1>", None));
        assert_eq!(welcome.color, 0x00ff99);

        let goodbye = render(&broken, EventKind::Goodbye, &context("u", None));
        assert_eq!(goodbye.color, 0xff5555);

        let mut styled = template("hi");
        styled.color_hex = Some("#112233".to_string());
        let payload = render(&styled, EventKind::Goodbye, &context("u", None));
        assert_eq!(payload.color, 0x112233);
    }

    #[test]
    fn test_absent_image_is_omitted() {
        let payload = render(&template("hi"), EventKind::Goodbye, &context("u", None));
        assert_eq!(payload.image, None);

        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("image"));
        assert!(!object.contains_key("thumbnail"));
    }

    #[test]
    fn test_image_survives_persistence() {
        let mut with_gif = template("hi");
        with_gif.image_url = Some("https://example.com/party.gif".to_string());

        let json = serde_json::to_string(&with_gif).unwrap();
        let restored: EventTemplate = serde_json::from_str(&json).unwrap();
        let payload = render(&restored, EventKind::Welcome, &context("<@1>", None));
        assert_eq!(payload.image.as_deref(), Some("https://example.com/party.gif"));

        let json = serde_json::to_string(&template("hi")).unwrap();
        let restored: EventTemplate = serde_json::from_str(&json).unwrap();
        let payload = render(&restored, EventKind::Welcome, &context("<@1>", None));
        assert_eq!(payload.image, None);
    }

    #[test]
    fn test_announcement_is_verbatim() {
        let payload = render_announcement("News {server}", "Hello {user}", None, Some(""));
        assert_eq!(payload.title, "News {server}");
        assert_eq!(payload.description, "Hello {user}");
        assert_eq!(payload.color, 0x5865f2);
        assert_eq!(payload.image, None);
        assert_eq!(payload.thumbnail, None);
    }
}
