//! Configuration loading and validation.
//!
//! Every section and field has a default, so an empty file (or no file) is a valid
//! configuration.
//!
//! ```toml
//! [remote]
//! buffer_size = 32
//!
//! [notifications]
//! display_ms = 3000
//!
//! [logging]
//! level = "info"
//! format = "compact"   # or "full"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use inventory_sync::config::InventoryConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = InventoryConfig::load("inventory.toml")?;
//!     assert!(config.remote.buffer_size > 0);
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The in-process remote store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Capacity of the request channel.
    pub buffer_size: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    /// How long a message stays visible, in milliseconds.
    pub display_ms: u64,
}

impl NotificationConfig {
    pub fn display_for(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { display_ms: 3000 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line output without span context.
    #[default]
    Compact,
    /// The default `tracing-subscriber` format, spans included.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Compact,
        }
    }
}

impl InventoryConfig {
    /// Parses and validates a TOML document.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.buffer_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "remote.buffer_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.notifications.display_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notifications.display_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
