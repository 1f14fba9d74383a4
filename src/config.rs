//! # Configuration Management
//!
//! Centralized configuration for the codec layer.
//!
//! The byte order and decode limits are carried as an explicit value that every
//! stream is built from, so the whole crate can be exercised against either byte
//! order without touching a hidden default.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{warn, Level};

/// Fixed allocation, in bytes, of each name field in the character summary record
pub const CHARACTER_NAME_LENGTH: usize = 33;

/// Literal prepended to every markup document in a property list.
/// The missing `?` before `>` is what the client expects.
pub const XML_HEADER: &str = "<?xml version=\"1.0\">";

/// First zone version carrying the reserved word after the version
pub const ZONE_VERSION_RESERVED_WORD: u32 = 0x24;

/// First zone version with a 4-byte scene count
pub const ZONE_VERSION_WIDE_SCENE_COUNT: u32 = 0x25;

/// First zone version carrying the spawn point
pub const ZONE_VERSION_SPAWN_POINT: u32 = 0x26;

/// Default upper bound on declared scene counts
pub const MAX_SCENE_COUNT: usize = 4096;

/// Default upper bound on a single length-prefixed string
pub const MAX_STRING_LENGTH: usize = 16 * 1024 * 1024;

/// Marks validation entries that are reported but never fatal
pub const WARNING_PREFIX: &str = "WARNING:";

/// Byte order of every multi-byte integer and float on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// The game client's order
    #[default]
    Little,
    Big,
}

impl FromStr for ByteOrder {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(ByteOrder::Little),
            "big" | "be" => Ok(ByteOrder::Big),
            other => Err(ProtocolError::ConfigError(format!(
                "Invalid byte order: '{other}' (expected 'little' or 'big')"
            ))),
        }
    }
}

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Stream-level settings
    #[serde(default)]
    pub stream: StreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override fields from `WORLD_PROTOCOL_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(order) = std::env::var("WORLD_PROTOCOL_BYTE_ORDER") {
            self.stream.byte_order = order.parse()?;
        }

        if let Ok(limit) = std::env::var("WORLD_PROTOCOL_MAX_SCENES") {
            self.stream.max_scene_count = limit.parse::<usize>().map_err(|e| {
                ProtocolError::ConfigError(format!("Invalid WORLD_PROTOCOL_MAX_SCENES '{limit}': {e}"))
            })?;
        }

        if let Ok(level) = std::env::var("WORLD_PROTOCOL_LOG_LEVEL") {
            self.logging.log_level = Level::from_str(&level).map_err(|e| {
                ProtocolError::ConfigError(format!("Invalid WORLD_PROTOCOL_LOG_LEVEL '{level}': {e}"))
            })?;
        }

        Ok(())
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.stream.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result; `WARNING:` entries are logged, not fatal
    pub fn validate_strict(&self) -> Result<()> {
        let (warnings, errors): (Vec<_>, Vec<_>) = self
            .validate()
            .into_iter()
            .partition(|entry| entry.starts_with(WARNING_PREFIX));
        for warning in &warnings {
            warn!("{warning}");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Settings every `ReadStream`/`WriteStream` is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Byte order for the whole format
    pub byte_order: ByteOrder,

    /// Largest scene count a zone file may declare
    pub max_scene_count: usize,

    /// Largest length a string prefix may declare
    pub max_string_length: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Little,
            max_scene_count: MAX_SCENE_COUNT,
            max_string_length: MAX_STRING_LENGTH,
        }
    }
}

impl StreamConfig {
    /// Default limits with an explicit byte order
    pub fn with_byte_order(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            ..Self::default()
        }
    }

    /// Validate stream configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_scene_count == 0 {
            errors.push("Max scene count must be greater than 0".to_string());
        } else if self.max_scene_count > u32::MAX as usize {
            errors.push(format!(
                "Max scene count too large: {} (a zone cannot declare more than {})",
                self.max_scene_count,
                u32::MAX
            ));
        }

        if self.max_string_length < CHARACTER_NAME_LENGTH {
            errors.push(format!(
                "Max string length too small: {} (minimum: {CHARACTER_NAME_LENGTH})",
                self.max_string_length
            ));
        } else if self.max_string_length > u32::MAX as usize {
            errors.push(format!(
                "Max string length too large: {} (a u32 prefix cannot exceed {})",
                self.max_string_length,
                u32::MAX
            ));
        }

        if self.byte_order == ByteOrder::Big {
            errors.push(
                format!("{WARNING_PREFIX} Big-endian streams do not match the game client"),
            );
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("world-protocol"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_byte_order_parse() {
        assert_eq!("little".parse::<ByteOrder>().unwrap(), ByteOrder::Little);
        assert_eq!("BE".parse::<ByteOrder>().unwrap(), ByteOrder::Big);
        assert!("middle".parse::<ByteOrder>().is_err());
    }

    #[test]
    fn test_example_config_parses_back() {
        let text = CodecConfig::example_config();
        let parsed = CodecConfig::from_toml(&text).expect("example config should parse");
        assert_eq!(parsed.stream, StreamConfig::default());
        assert_eq!(parsed.logging.log_level, Level::INFO);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = CodecConfig::from_toml(
            r#"
            [stream]
            byte_order = "big"
            max_scene_count = 16
            max_string_length = 1024
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(parsed.stream.byte_order, ByteOrder::Big);
        assert_eq!(parsed.stream.max_scene_count, 16);
        assert_eq!(parsed.logging.app_name, "world-protocol");
    }

    #[test]
    fn test_big_endian_is_a_warning_only() {
        let config = CodecConfig::default_with_overrides(|c| {
            c.stream.byte_order = ByteOrder::Big;
        });
        assert!(config.validate().iter().any(|e| e.starts_with(WARNING_PREFIX)));
        assert!(config.validate_strict().is_ok());

        let broken = CodecConfig::default_with_overrides(|c| c.stream.max_scene_count = 0);
        assert!(broken.validate_strict().is_err());
    }
}
