// Process status: liveness, guild count and uptime

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::utils::formatters::format_uptime;

#[derive(Debug)]
pub struct BotStatus {
    started: Instant,
    started_at: DateTime<Utc>,
    guilds: AtomicUsize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub status: &'static str,
    pub guilds: usize,
    pub uptime_secs: u64,
    pub uptime: String,
    pub started_at: DateTime<Utc>,
}

impl BotStatus {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
            guilds: AtomicUsize::new(0),
        }
    }

    pub fn set_guild_count(&self, count: usize) {
        self.guilds.store(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        let uptime_secs = self.started.elapsed().as_secs();

        StatusSnapshot {
            status: "online",
            guilds: self.guilds.load(Ordering::Relaxed),
            uptime_secs,
            uptime: format_uptime(uptime_secs),
            started_at: self.started_at,
        }
    }
}

impl Default for BotStatus {
    fn default() -> Self {
        Self::new()
    }
}
