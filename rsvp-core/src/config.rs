//! Global rsvp configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};

static DEFAULT_DATA_PATH: &str = "~/.rsvp";
static DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// How often views re-read the store when nothing else is configured.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Configuration at ~/.config/rsvp/config.toml, overlaid with `RSVP_*`
/// environment variables (e.g. `RSVP_DATA_DIR`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RsvpConfig {
    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Origin used for event URLs and invitation links.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for RsvpConfig {
    fn default() -> Self {
        RsvpConfig {
            data_dir: default_data_path(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            base_url: default_base_url(),
        }
    }
}

impl RsvpConfig {
    pub fn config_path() -> RsvpResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RsvpError::Config("Could not determine config directory".into()))?
            .join("rsvp");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented-out default file first
    /// if none exists yet.
    pub fn load() -> RsvpResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> RsvpResult<Self> {
        let config: RsvpConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("RSVP").try_parsing(true))
            .build()
            .map_err(|e| RsvpError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RsvpError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Only what is written in the file at `path`, without the environment
    /// overlay. Defaults if the file doesn't exist.
    pub fn read_file(path: &Path) -> RsvpResult<Self> {
        if !path.exists() {
            return Ok(RsvpConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| RsvpError::Config(e.to_string()))
    }

    /// Save to `path`, replacing whatever was there.
    pub fn save_to(&self, path: &Path) -> RsvpResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)
            .map_err(|e| RsvpError::Config(format!("Could not write config file: {e}")))?;
        Ok(())
    }

    pub fn to_toml(&self) -> RsvpResult<String> {
        toml::to_string_pretty(self).map_err(|e| RsvpError::Config(e.to_string()))
    }

    /// Set one option by its config-file key.
    pub fn set(&mut self, key: &str, value: &str) -> RsvpResult<()> {
        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "poll_interval_secs" => {
                self.poll_interval_secs = value.parse().map_err(|_| {
                    RsvpError::Config(format!("poll_interval_secs must be a number, got '{value}'"))
                })?;
            }
            "base_url" => self.base_url = value.to_string(),
            other => return Err(RsvpError::Config(format!("Unknown config key '{other}'"))),
        }
        self.validate()
    }

    fn validate(&self) -> RsvpResult<()> {
        if self.poll_interval_secs == 0 {
            return Err(RsvpError::Config(
                "poll_interval_secs must be at least 1".into(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(RsvpError::Config("base_url must not be empty".into()));
        }
        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RsvpResult<()> {
        let contents = format!(
            "\
# rsvp configuration

# Where users, events and the login session are stored:
# data_dir = \"{}\"

# How often `--watch` views re-read the store, in seconds:
# poll_interval_secs = {}

# Origin used for event links and invitations:
# base_url = \"{}\"
",
            DEFAULT_DATA_PATH, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_BASE_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RsvpError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RsvpError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
