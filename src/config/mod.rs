//! Application settings
//!
//! Layered with the `config` crate: an optional TOML file, built-in defaults,
//! `OCGUI_*` environment overrides, then command-line overrides. The result
//! is checked by [`validator::SettingsValidator`] before it is handed out.
//!
//! Environment keys look like `OCGUI_STORAGE__DATA_DIR`.

pub mod validator;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::constants;
use crate::persistence::PersistenceConfig;
use crate::storage::StorageBackend;

pub const DEFAULT_CONFIG_FILE: &str = "ocgui.toml";
const ENV_PREFIX: &str = "OCGUI";
const DATABASE_FILE: &str = "ocgui.db";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    pub runs: RunSettings,
    pub search: SearchSettings,
    pub toast: ToastSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding persisted slices and the run database
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    /// Falls back to `sqlite://<data_dir>/ocgui.db`
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunSettings {
    pub default_limit: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    pub min_query_length: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToastSettings {
    pub duration_ms: u64,
    pub max_visible: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    pub level: String,
}

/// Platform data directory with an `ocgui` subdirectory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("ocgui"))
        .unwrap_or_else(|| PathBuf::from(".ocgui"))
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Settings from a config file (missing file is fine) plus environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path.as_ref())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let data_dir = default_data_dir();

        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .set_default("storage.backend", StorageBackend::default().to_string())?
            .set_default("storage.data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("database.max_connections", 5)?
            .set_default("runs.default_limit", constants::runs::DEFAULT_LIMIT)?
            .set_default("search.debounce_ms", constants::search::DEBOUNCE_MS)?
            .set_default(
                "search.min_query_length",
                constants::search::MIN_QUERY_LENGTH as u64,
            )?
            .set_default("toast.duration_ms", constants::toast::DEFAULT_DURATION_MS)?
            .set_default("toast.max_visible", constants::toast::MAX_VISIBLE as u64)?
            .set_default("logging.level", "info")?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        tracing::debug!(config = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(backend) = cli.storage {
            self.storage.backend = backend;
        }
        if let Some(data_dir) = &cli.data_dir {
            self.storage.data_dir = data_dir.clone();
        }
        if let Some(url) = &cli.database_url {
            self.database.url = Some(url.clone());
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::SettingsValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Configured run database URL, or the file under the data directory
    pub fn database_url(&self) -> String {
        match &self.database.url {
            Some(url) => url.clone(),
            None => format!(
                "sqlite://{}",
                self.storage.data_dir.join(DATABASE_FILE).display()
            ),
        }
    }

    pub fn persistence_config(&self) -> PersistenceConfig {
        PersistenceConfig {
            url: self.database_url(),
            max_connections: self.database.max_connections,
            auto_migrate: true,
        }
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast.duration_ms)
    }
}
