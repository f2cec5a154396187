use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::logging::LoggingConfig;

pub mod error;
pub use error::ConfigError;

pub mod reference_time;
pub use reference_time::{ReferenceTime, ReferenceTimeError};

/// Run settings, read from an optional JSON file and completed from the
/// command line. Every field may be absent in the file.
#[derive(Debug, Clone, Default)]
pub struct SimulatorConfig {
    reference_time: Option<ReferenceTime>,
    satellite_id: Option<String>,
    output_directory: Option<PathBuf>,
    logging: LoggingConfig,
}

// Deserializes through a helper so the reference time is parsed and the
// satellite id checked while reading the file.
impl<'de> Deserialize<'de> for SimulatorConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            reference_time: Option<String>,
            satellite_id: Option<String>,
            output_directory: Option<PathBuf>,
            #[serde(default)]
            logging: LoggingConfig,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let reference_time = helper
            .reference_time
            .map(|text| text.parse::<ReferenceTime>())
            .transpose()
            .map_err(D::Error::custom)?;

        if helper.satellite_id.as_deref() == Some("") {
            return Err(D::Error::custom(ConfigError::SatelliteId));
        }

        helper.logging.validate().map_err(D::Error::custom)?;

        Ok(SimulatorConfig {
            reference_time,
            satellite_id: helper.satellite_id,
            output_directory: helper.output_directory,
            logging: helper.logging,
        })
    }
}

impl SimulatorConfig {
    pub fn new(
        reference_time: ReferenceTime,
        satellite_id: impl Into<String>,
        output_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reference_time: Some(reference_time),
            satellite_id: Some(satellite_id.into()),
            output_directory: Some(output_directory.into()),
            logging: LoggingConfig::default(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SimulatorConfig, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: SimulatorConfig = serde_json::from_reader(reader)?;

        Ok(config)
    }

    /// Command-line values win over whatever the file provided.
    pub fn with_overrides(
        mut self,
        reference_time: Option<&str>,
        satellite_id: Option<&str>,
        output_directory: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let Some(text) = reference_time {
            self.reference_time = Some(text.parse()?);
        }
        if let Some(id) = satellite_id {
            if id.is_empty() {
                return Err(ConfigError::SatelliteId);
            }
            self.satellite_id = Some(id.to_string());
        }
        if let Some(dir) = output_directory {
            self.output_directory = Some(dir.to_path_buf());
        }
        Ok(self)
    }

    pub fn reference_time(&self) -> Result<&ReferenceTime, ConfigError> {
        self.reference_time
            .as_ref()
            .ok_or(ConfigError::Missing("reference_time"))
    }

    pub fn satellite_id(&self) -> Result<&str, ConfigError> {
        self.satellite_id
            .as_deref()
            .ok_or(ConfigError::Missing("satellite_id"))
    }

    pub fn output_directory(&self) -> Result<&Path, ConfigError> {
        self.output_directory
            .as_deref()
            .ok_or(ConfigError::Missing("output_directory"))
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn logging_mut(&mut self) -> &mut LoggingConfig {
        &mut self.logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, file_path)
    }

    #[test]
    fn test_from_file() {
        let (_dir, file_path) = write_config(
            r#"
    {
        "reference_time": "UTC=2020-01-01T00:00:00",
        "satellite_id": "S3A",
        "output_directory": "/tmp/acq",
        "logging": { "level": "debug", "format": "json" }
    }
    "#,
        );

        let config = SimulatorConfig::from_file(file_path).unwrap();

        assert_eq!(
            config.reference_time().unwrap().instant(),
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .expect("Invalid date")
                .and_hms_opt(0, 0, 0)
                .expect("Invalid time")
        );
        assert_eq!(config.satellite_id().unwrap(), "S3A");
        assert_eq!(config.output_directory().unwrap(), Path::new("/tmp/acq"));
        assert_eq!(config.logging().level, "debug");
        assert_eq!(config.logging().format, "json");
    }

    #[test]
    fn test_partial_file_is_completed_by_overrides() {
        let (_dir, file_path) = write_config(r#"{ "satellite_id": "S3B" }"#);

        let config = SimulatorConfig::from_file(file_path).unwrap();
        assert!(matches!(
            config.reference_time(),
            Err(ConfigError::Missing("reference_time"))
        ));

        let config = config
            .with_overrides(
                Some("UTC=2020-01-01T00:00:00"),
                None,
                Some(Path::new("out")),
            )
            .unwrap();

        assert_eq!(config.satellite_id().unwrap(), "S3B");
        assert_eq!(
            config.reference_time().unwrap().to_string(),
            "UTC=2020-01-01T00:00:00"
        );
        assert_eq!(config.output_directory().unwrap(), Path::new("out"));
        assert_eq!(config.logging().level, "info");
    }

    #[test]
    fn test_invalid_reference_time_in_file() {
        let (_dir, file_path) = write_config(r#"{ "reference_time": "2020-01-01" }"#);

        assert!(matches!(
            SimulatorConfig::from_file(file_path),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_empty_satellite_id_is_rejected() {
        let (_dir, file_path) = write_config(r#"{ "satellite_id": "" }"#);
        assert!(SimulatorConfig::from_file(file_path).is_err());

        let overridden = SimulatorConfig::default().with_overrides(None, Some(""), None);
        assert!(matches!(overridden, Err(ConfigError::SatelliteId)));
    }
}
