use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::provider::ProviderId;

/// One slot in the aggregation order.
///
/// Entries are queried in the order they appear in the file; the same `kind`
/// may appear more than once.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEntry {
    /// Provider short name, e.g. "openweathermap" or "wunderground".
    pub kind: String,

    /// API key for this slot. If absent, the provider's environment variable
    /// is consulted at startup (see [`Config::resolve_env_keys`]).
    #[serde(default)]
    pub api_key: Option<String>,

    /// Override the provider's endpoint host, e.g. for a local test double.
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Top-level configuration.
///
/// Example TOML:
///
/// ```toml
/// [server]
/// port = 8080
///
/// [[providers]]
/// kind = "openweathermap"
/// api_key = "..."
///
/// [[providers]]
/// kind = "wunderground"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            providers: default_providers(),
        }
    }
}

fn default_providers() -> Vec<ProviderEntry> {
    ProviderId::all()
        .iter()
        .map(|id| ProviderEntry {
            kind: id.as_str().to_string(),
            api_key: None,
            base_url: None,
        })
        .collect()
}

impl Config {
    /// Load config from `path`, or return the default configuration if the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Ok(toml::from_str(&contents)?)
    }

    /// Fill in API keys that were not set in the file from the environment
    /// (`OPENWEATHERMAP_API_KEY`, `WUNDERGROUND_API_KEY`).
    ///
    /// Keys given explicitly in the file win over the environment. Entries
    /// with an unknown `kind` are left untouched; they fail later, at
    /// provider construction, with a message naming the supported kinds.
    pub fn resolve_env_keys(&mut self) {
        self.resolve_keys_with(|name| std::env::var(name).ok());
    }

    fn resolve_keys_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for entry in &mut self.providers {
            if entry.api_key.is_none()
                && let Ok(id) = ProviderId::try_from(entry.kind.as_str())
            {
                entry.api_key = lookup(id.env_var());
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}
