//! Structured logging on top of `tracing`.
//!
//! `ACQSIM_LOG` takes precedence over the configured level and accepts any
//! `EnvFilter` directive (e.g. `acqsim::generator=debug`).

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ConfigError;

const LOG_ENV: &str = "ACQSIM_LOG";

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// text or json
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_level(&self.level)?;
        match self.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::LogFormat(other.to_string())),
        }
    }
}

/// A bare word must be a level name; anything with `=` is parsed as a full
/// `EnvFilter` directive list.
fn parse_level(level: &str) -> Result<EnvFilter, ConfigError> {
    let invalid = |reason: String| ConfigError::LogLevel {
        level: level.to_string(),
        reason,
    };

    if !level.contains('=') {
        level
            .parse::<LevelFilter>()
            .map_err(|e| invalid(e.to_string()))?;
    }
    EnvFilter::try_new(level).map_err(|e| invalid(e.to_string()))
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => parse_level(&config.level),
    }
}

/// Installs the global subscriber. Logs go to stderr so that command output
/// on stdout stays machine readable.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    config.validate()?;

    let filter = build_env_filter(config)?;
    let base_subscriber = Registry::default().with(filter);

    if config.format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
