use crate::config::reference_time::ReferenceTimeError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    ReferenceTime(#[from] ReferenceTimeError),
    #[error("satellite_id must not be empty")]
    SatelliteId,
    #[error("missing required setting '{0}' (pass it on the command line or in the config file)")]
    Missing(&'static str),
    #[error("invalid log level '{level}': {reason}")]
    LogLevel { level: String, reason: String },
    #[error("log format should be one of text, json (got '{0}')")]
    LogFormat(String),
}
