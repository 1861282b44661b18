// Guild configuration model
// Matches the persisted welcomeConfig.json document structure

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::config::colors;

/// Full persisted document: guild id -> guild configuration
pub type GuildConfigMap = BTreeMap<String, GuildConfig>;

/// Membership lifecycle transition a template applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Welcome,
    Goodbye,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Welcome => "welcome",
            EventKind::Goodbye => "goodbye",
        }
    }

    /// Color used whenever the configured one does not parse
    pub fn default_color(&self) -> &'static str {
        match self {
            EventKind::Welcome => colors::WELCOME_DEFAULT,
            EventKind::Goodbye => colors::GOODBYE_DEFAULT,
        }
    }

    /// Fixed embed title for this kind
    pub fn title(&self) -> &'static str {
        match self {
            EventKind::Welcome => "🎉 Welcome!",
            EventKind::Goodbye => "👋 Goodbye",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Template record for one event kind in one guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    /// Destination channel ID
    #[serde(rename = "channel")]
    pub channel_id: String,
    /// Free text with `{user}` / `{server}` placeholders
    #[serde(rename = "message")]
    pub message_template: String,
    /// Stored verbatim, may be invalid hex
    #[serde(rename = "color", default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
    #[serde(
        rename = "gif",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub image_url: Option<String>,
}

/// Guild (Server) specific configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GuildConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome: Option<EventTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goodbye: Option<EventTemplate>,
}

impl GuildConfig {
    pub fn template(&self, kind: EventKind) -> Option<&EventTemplate> {
        match kind {
            EventKind::Welcome => self.welcome.as_ref(),
            EventKind::Goodbye => self.goodbye.as_ref(),
        }
    }

    /// Replaces the slot wholesale, never merging fields
    pub fn set_template(&mut self, kind: EventKind, template: EventTemplate) {
        match kind {
            EventKind::Welcome => self.welcome = Some(template),
            EventKind::Goodbye => self.goodbye = Some(template),
        }
    }
}

// Older documents wrote `"gif": null` or `"gif": ""` when no image was given
fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
