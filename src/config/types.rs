//! Core configuration types and loading.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::defaults::{
    default_connect_delay_ms, default_log_filter, default_port, default_user,
};
use super::limits::LimitsConfig;
use crate::engine::EngineConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Server to connect to.
    pub server: ServerConfig,
    /// Who we register as.
    pub identity: IdentityConfig,
    /// Session behaviour (auto-join, connect delay).
    #[serde(default)]
    pub session: SessionConfig,
    /// Line length limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// The engine parameters this configuration describes.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            server_host: self.server.host.clone(),
            server_port: self.server.port,
            password: self.server.password.clone(),
            nick: self.identity.nick.clone(),
            realname: self.identity.realname.clone(),
            user_placeholder: self.identity.user.clone(),
            connect_delay: Duration::from_millis(self.session.connect_delay_ms),
        }
    }
}

/// Server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server hostname (e.g., "irc.libera.chat"). Also the expected PING token.
    pub host: String,
    /// Server port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connection password (optional). PASS is sent only when non-empty.
    #[serde(default)]
    pub password: Option<String>,
}

/// Identity used during registration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub nick: String,
    /// Real name sent with USER (default: empty).
    #[serde(default)]
    pub realname: String,
    /// Placeholder repeated in USER (default: "parley").
    #[serde(default = "default_user")]
    pub user: String,
}

/// Session behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Channels joined once registration completes.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Pause before the transport is opened, in milliseconds (default: 100).
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            connect_delay_ms: default_connect_delay_ms(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration. `RUST_LOG` overrides `filter` when set.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}
