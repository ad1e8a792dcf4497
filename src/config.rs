//! Application configuration
//!
//! Stored at `~/.config/healthdesk/config.toml` (or `$HEALTHDESK_CONFIG`).
//! A missing file or missing keys fall back to defaults.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 54321
//!
//! [storage]
//! data_dir = "/var/lib/healthdesk"
//!
//! [auth]
//! session_ttl_minutes = 60
//! min_password_len = 6
//!
//! [registration]
//! policy = "compensating"
//!
//! [summary]
//! metric_limit = 4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::services::validation::DEFAULT_MIN_PASSWORD_LEN;
use crate::core::services::{DEFAULT_METRIC_LIMIT, RegistrationOptions, RegistrationPolicy};
use crate::paths;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
    /// Where records and documents live
    #[serde(default)]
    pub storage: StorageConfig,
    /// Sessions and passwords
    #[serde(default)]
    pub auth: AuthConfig,
    /// Registration saga
    #[serde(default)]
    pub registration: RegistrationConfig,
    /// Health summary
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    54321
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port`
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory (defaults to the platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Keep everything in memory and never write to disk
    #[serde(default)]
    pub in_memory: bool,
}

impl StorageConfig {
    /// Configured data dir or the platform default
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::default_data_dir)
    }
}

/// Session and password settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in minutes
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u32,
    /// Minimum password length at sign-up
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

const fn default_session_ttl() -> u32 {
    60
}

const fn default_min_password_len() -> usize {
    DEFAULT_MIN_PASSWORD_LEN
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: default_session_ttl(),
            min_password_len: default_min_password_len(),
        }
    }
}

impl AuthConfig {
    /// Session lifetime
    #[must_use]
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_ttl_minutes))
    }
}

/// Registration settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// What to do with completed steps when a later one fails
    #[serde(default)]
    pub policy: RegistrationPolicy,
}

/// Health summary settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Most recent metrics returned
    #[serde(default = "default_metric_limit")]
    pub metric_limit: usize,
}

const fn default_metric_limit() -> usize {
    DEFAULT_METRIC_LIMIT
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            metric_limit: default_metric_limit(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load config from the default location
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, or defaults when it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Options handed to the registration saga
    #[must_use]
    pub const fn registration_options(&self) -> RegistrationOptions {
        RegistrationOptions {
            policy: self.registration.policy,
            min_password_len: self.auth.min_password_len,
        }
    }
}
