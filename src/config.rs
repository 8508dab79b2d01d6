//! Runtime configuration for the simulator and its web surface.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const API_KEY_ENV: &str = "NASA_API_KEY";
pub const DEMO_API_KEY: &str = "DEMO_KEY";

fn default_api_key() -> String {
    DEMO_API_KEY.to_string()
}

fn default_archive_url() -> String {
    "https://archive-api.open-meteo.com/v1/archive".to_string()
}

fn default_events_url() -> String {
    "https://eonet.gsfc.nasa.gov/api/v3/events".to_string()
}

fn default_key_test_url() -> String {
    "https://api.nasa.gov/planetary/apod".to_string()
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_location_label() -> String {
    "New York".to_string()
}

fn default_latitude() -> f64 {
    40.7128
}

fn default_longitude() -> f64 {
    -74.0060
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Master seed for reproducible draws. Fresh entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_key")]
    pub key: String,
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    #[serde(default = "default_events_url")]
    pub events_url: String,
    #[serde(default = "default_key_test_url")]
    pub key_test_url: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: default_api_key(),
            archive_url: default_archive_url(),
            events_url: default_events_url(),
            key_test_url: default_key_test_url(),
            timezone: default_timezone(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Fixed coordinates used for every live query and the map marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_label")]
    pub label: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            label: default_location_label(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise defaults, then applies the API key
    /// from the environment if one is set.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.apply_api_key(key);
        }
        Ok(config)
    }

    pub fn apply_api_key(&mut self, key: String) {
        let key = key.trim();
        if !key.is_empty() {
            self.api.key = key.to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(ConfigError::Validation(format!(
                "latitude {} must be within [-90, 90]",
                self.location.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            return Err(ConfigError::Validation(format!(
                "longitude {} must be within [-180, 180]",
                self.location.longitude
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        for (name, url) in [
            ("api.archive_url", &self.api.archive_url),
            ("api.events_url", &self.api.events_url),
            ("api.key_test_url", &self.api.key_test_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_new_york() {
        let config = Config::default();
        assert_eq!(config.api.key, "DEMO_KEY");
        assert_eq!(config.location.latitude, 40.7128);
        assert_eq!(config.location.longitude, -74.0060);
        assert_eq!(config.server.port, 8080);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str(
            "seed: 7\napi:\n  timeout_secs: 3\nlocation:\n  label: Oslo\n",
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.api.timezone, "America/New_York");
        assert_eq!(config.location.label, "Oslo");
        assert_eq!(config.location.latitude, 40.7128);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_from_path_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "location:\n  latitude: 123.0").unwrap();
        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load_from_path("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }

    #[test]
    fn bundled_example_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/chronosim.yaml");
        let config = Config::load_from_path(path).unwrap();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.location.label, "New York");
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let mut config = Config::default();
        config.apply_api_key("   ".into());
        assert_eq!(config.api.key, "DEMO_KEY");
        config.apply_api_key(" abc123 ".into());
        assert_eq!(config.api.key, "abc123");
    }
}
