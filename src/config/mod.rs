//
//  refdesk
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module handles loading, saving, and accessing refdesk settings from a
//! TOML file stored in the platform-specific configuration directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/refdesk/config.toml`
//! - **macOS**: `~/Library/Application Support/refdesk/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\refdesk\config\config.toml`
//!
//! The `REFDESK_CONFIG` environment variable overrides the location.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://referees.example.org/api"
//! timeout_ms = 10000
//! match_timeout_ms = 8000
//! page_size = 20
//!
//! [session]
//! backend = "file"
//! path = "/var/lib/refdesk/session.json"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use refdesk::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("api.base_url", "https://referees.example.org/api")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "REFDESK_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: [&str; 6] = [
    "api.base_url",
    "api.timeout_ms",
    "api.match_timeout_ms",
    "api.page_size",
    "session.backend",
    "session.path",
];

/// Global configuration container.
///
/// All sections use `#[serde(default)]` so a partial file loads cleanly.
///
/// ```rust
/// use refdesk::config::{Config, SessionBackend};
///
/// let config = Config::default();
/// assert_eq!(config.api.base_url, "http://localhost:8000/api");
/// assert_eq!(config.session.backend, SessionBackend::Keyring);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Connection settings for the referee service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base endpoint every resource path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Timeout for fetching a single match, in milliseconds.
    #[serde(default = "default_match_timeout_ms")]
    pub match_timeout_ms: u64,

    /// Page size requested for appointment listings.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_match_timeout_ms() -> u64 {
    8_000
}

fn default_page_size() -> u32 {
    crate::api::common::DEFAULT_PAGE_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            match_timeout_ms: default_match_timeout_ms(),
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn match_timeout(&self) -> Duration {
        Duration::from_millis(self.match_timeout_ms)
    }
}

/// Where the Session Credential is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// The system keyring
    #[default]
    Keyring,
    /// A JSON token file
    File,
}

impl std::fmt::Display for SessionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyring => write!(f, "keyring"),
            Self::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for SessionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keyring" => Ok(Self::Keyring),
            "file" => Ok(Self::File),
            other => bail!("Unknown session backend '{}' (expected 'keyring' or 'file')", other),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// Token file for the file backend. Defaults to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_config_file(path, &content)
    }

    /// Path to the configuration file, honouring `REFDESK_CONFIG`.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Platform data directory, home of the default token file.
    pub fn data_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    /// Gets a value by dotted key, e.g. `api.base_url`.
    ///
    /// ```rust
    /// use refdesk::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("api.page_size"), Some("20".to_string()));
    /// assert_eq!(config.get("session.path"), None);
    /// assert_eq!(config.get("unknown"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout_ms" => Some(self.api.timeout_ms.to_string()),
            "api.match_timeout_ms" => Some(self.api.match_timeout_ms.to_string()),
            "api.page_size" => Some(self.api.page_size.to_string()),
            "session.backend" => Some(self.session.backend.to_string()),
            "session.path" => self.session.path.as_ref().map(|p| p.display().to_string()),
            _ => None,
        }
    }

    /// Sets a value by dotted key.
    ///
    /// Numeric keys are validated; the base URL must parse as a URL.
    /// Changes are only persisted when [`Config::save`] is called.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                url::Url::parse(value).with_context(|| format!("Invalid URL '{}'", value))?;
                self.api.base_url = value.to_string();
            }
            "api.timeout_ms" => self.api.timeout_ms = parse_number(key, value)?,
            "api.match_timeout_ms" => self.api.match_timeout_ms = parse_number(key, value)?,
            "api.page_size" => {
                let size: u32 = parse_number(key, value)?;
                if size == 0 {
                    bail!("'{}' must be greater than zero", key);
                }
                self.api.page_size = size;
            }
            "session.backend" => self.session.backend = value.parse()?,
            "session.path" => self.session.path = Some(PathBuf::from(value)),
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "refdesk")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' expects a positive number, got '{}'", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://ref.example.org/api\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://ref.example.org/api");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.api.match_timeout_ms, 8_000);
        assert_eq!(config.session.backend, SessionBackend::Keyring);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("api.timeout_ms", "2500").unwrap();
        config.set("session.backend", "file").unwrap();
        config.set("session.path", "/tmp/token.json").unwrap();

        assert_eq!(config.get("api.timeout_ms").as_deref(), Some("2500"));
        assert_eq!(config.session.backend, SessionBackend::File);
        assert_eq!(config.get("session.path").as_deref(), Some("/tmp/token.json"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api.timeout_ms", "soon").is_err());
        assert!(config.set("api.page_size", "0").is_err());
        assert!(config.set("api.base_url", "not a url").is_err());
        assert!(config.set("session.backend", "vault").is_err());
        assert!(config.set("editor", "vim").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.set("api.base_url", "https://ref.example.org/api").unwrap();
        config.set("session.backend", "file").unwrap();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
