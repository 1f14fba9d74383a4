//! Structured logging setup.
//!
//! Builds a `tracing-subscriber` registry from [`LoggingConfig`]: an env filter
//! seeded with the configured level, a console layer and an optional file layer.
//! `RUST_LOG` overrides the configured level when set.

use crate::config::LoggingConfig;
use crate::error::{constants, ProtocolError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Env filter for the configured level
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy()
}

fn console_layer(config: &LoggingConfig) -> BoxedLayer {
    if config.json_format {
        fmt::layer().json().with_current_span(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    }
}

fn file_layer(config: &LoggingConfig) -> Result<Option<BoxedLayer>> {
    if !config.log_to_file {
        return Ok(None);
    }
    let path = config.log_file_path.as_deref().ok_or_else(|| {
        ProtocolError::ConfigError(
            "log_file_path must be specified when log_to_file is true".to_string(),
        )
    })?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let writer = Mutex::new(file);

    let layer = if config.json_format {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer().with_ansi(false).with_writer(writer).boxed()
    };
    Ok(Some(layer))
}

/// Install the global subscriber.
///
/// Fails with [`ProtocolError::ConfigError`] when the configuration is invalid or a
/// global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ProtocolError::ConfigError(errors.join("; ")));
    }

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.log_to_console {
        layers.push(console_layer(config));
    }
    if let Some(layer) = file_layer(config)? {
        layers.push(layer);
    }

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(layers)
        .try_init()
        .map_err(|_| ProtocolError::ConfigError(constants::ERR_LOGGING_INITIALIZED.to_string()))?;

    tracing::info!(
        app = %config.app_name,
        version = env!("CARGO_PKG_VERSION"),
        level = %config.log_level,
        console = config.log_to_console,
        file = config.log_to_file,
        "Logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tracing::Level;

    #[test]
    fn test_invalid_config_is_rejected_before_install() {
        let config = LoggingConfig {
            log_to_console: false,
            log_to_file: false,
            ..LoggingConfig::default()
        };
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, ProtocolError::ConfigError(_)));
    }

    #[test]
    fn test_filter_carries_configured_level() {
        let config = LoggingConfig {
            log_level: Level::DEBUG,
            ..LoggingConfig::default()
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(build_filter(&config).max_level_hint(), Some(LevelFilter::DEBUG));
        }
    }

    #[test]
    fn test_second_init_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            log_to_console: false,
            log_to_file: true,
            log_file_path: Some(dir.path().join("codec.log").display().to_string()),
            ..LoggingConfig::default()
        };
        // The first call may lose to another test; the second always fails.
        let _ = init_logging(&config);
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, ProtocolError::ConfigError(ref msg) if msg == constants::ERR_LOGGING_INITIALIZED));
    }
}
