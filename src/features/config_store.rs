// Guild configuration store
// Whole map is loaded once at startup and written through after every change

use anyhow::{Context, Result};
use dashmap::DashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::models::guild::{EventKind, EventTemplate, GuildConfig, GuildConfigMap};

/// Durable storage for the full guild configuration document
pub trait ConfigBackend: Send + Sync {
    /// Returns `Ok(None)` when nothing has been persisted yet
    fn load(&self) -> Result<Option<GuildConfigMap>>;
    /// Overwrites the whole persisted document
    fn save(&self, configs: &GuildConfigMap) -> Result<()>;
}

/// Pretty-printed JSON document on the local filesystem
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "guilds.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ConfigBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<GuildConfigMap>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        let configs = serde_json::from_str::<GuildConfigMap>(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        Ok(Some(configs))
    }

    fn save(&self, configs: &GuildConfigMap) -> Result<()> {
        let json = serde_json::to_string_pretty(configs)
            .context("Failed to serialize guild configuration")?;

        // Write next to the target and rename so readers never see half a document
        let temp = self.temp_path();
        fs::write(&temp, json).with_context(|| format!("Failed to write {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved guild configuration to {}", self.path.display());
        Ok(())
    }
}

/// In-memory guild configuration cache backed by a `ConfigBackend`
pub struct ConfigStore {
    configs: DashMap<String, GuildConfig>,
    backend: Box<dyn ConfigBackend>,
}

impl ConfigStore {
    /// Load the persisted map. Unreadable state is treated as a first run.
    pub fn open(backend: impl ConfigBackend + 'static) -> Self {
        let configs = match backend.load() {
            Ok(Some(configs)) => {
                info!("Loaded configuration for {} guild(s)", configs.len());
                configs
            }
            Ok(None) => {
                info!("No saved guild configuration, starting empty");
                GuildConfigMap::new()
            }
            Err(e) => {
                warn!("Could not load guild configuration, starting empty: {:?}", e);
                GuildConfigMap::new()
            }
        };

        Self {
            configs: configs.into_iter().collect(),
            backend: Box::new(backend),
        }
    }

    pub fn get(&self, guild_id: &str) -> Option<GuildConfig> {
        self.configs.get(guild_id).map(|config| config.clone())
    }

    pub fn template(&self, guild_id: &str, kind: EventKind) -> Option<EventTemplate> {
        self.get(guild_id).and_then(|config| config.template(kind).cloned())
    }

    /// Create the guild entry if needed, replace the `kind` slot, then persist.
    ///
    /// The in-memory value is updated even when persisting fails.
    pub fn set_template(&self, guild_id: &str, kind: EventKind, template: EventTemplate) -> Result<()> {
        // Guard must be dropped before snapshot() iterates the map
        {
            let mut config = self.configs.entry(guild_id.to_string()).or_default();
            config.set_template(kind, template);
        }

        info!("Updated {} template for guild {}", kind, guild_id);

        if let Err(e) = self.save() {
            error!("Failed to persist guild configuration: {:?}", e);
            return Err(e);
        }

        Ok(())
    }

    /// Ordered copy of the whole map
    pub fn snapshot(&self) -> GuildConfigMap {
        self.configs
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Number of guilds with any configuration
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    fn save(&self) -> Result<()> {
        self.backend.save(&self.snapshot())
    }
}
