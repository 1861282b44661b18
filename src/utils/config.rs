// Centralized configuration for the greeter bot

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

/// Default location of the persisted guild configuration
pub const DEFAULT_STORE_PATH: &str = "welcomeConfig.json";

/// Default keep-alive port
pub const DEFAULT_PORT: u16 = 3000;

/// Discord embed colors
pub mod colors {
    pub const WELCOME_DEFAULT: &str = "#00ff99";
    pub const GOODBYE_DEFAULT: &str = "#ff5555";
    pub const ANNOUNCE_DEFAULT: &str = "#5865f2";
}

/// Fixed replies sent back to the invoking user
pub mod replies {
    pub const ONLINE: &str = "🟢 Bot online";
    pub const WELCOME_SET: &str = "✅ Welcome message set!";
    pub const GOODBYE_SET: &str = "✅ Goodbye message set!";
    pub const ANNOUNCED: &str = "📢 Announcement sent!";
    pub const SAFE_FAILURE: &str = "⚠️ Error handled safely";
}

/// Process settings read from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub store_path: PathBuf,
    pub port: u16,
}

impl Settings {
    /// Read settings from the environment. `DISCORD_TOKEN` is the only required variable.
    pub fn from_env() -> Result<Self> {
        let discord_token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;

        let store_path = env::var("GREETER_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH));

        let port = env::var("PORT").ok().map(|raw| parse_port(&raw)).unwrap_or(DEFAULT_PORT);

        Ok(Self {
            discord_token,
            store_path,
            port,
        })
    }
}

fn parse_port(raw: &str) -> u16 {
    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!("Invalid PORT value {:?}, using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }
    }
}
