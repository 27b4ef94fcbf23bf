//! Configuration management for the forecast service
//!
//! Handles loading configuration from an optional TOML file and
//! environment variables, and validates the result.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "FORECAST_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "forecast.toml";

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid(message.into())
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the built frontend, served for non-API paths
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

/// Geocoder and National Weather Service endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_geocoder_base_url")]
    pub geocoder_base_url: String,
    /// Census address benchmark the geocoder matches against
    #[serde(default = "default_census_benchmark")]
    pub census_benchmark: String,
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    /// api.weather.gov refuses requests without one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Transport timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_geocoder_base_url() -> String {
    "https://geocoding.geo.census.gov/geocoder".to_string()
}

fn default_census_benchmark() -> String {
    "2020".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    format!("addresscast/{} (forecast service)", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoder_base_url: default_geocoder_base_url(),
            census_benchmark: default_census_benchmark(),
            weather_base_url: default_weather_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl UpstreamConfig {
    /// Build the HTTP client shared by the geocoder and weather clients
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_seconds.into()))
            .user_agent(self.user_agent.as_str())
            .build()
    }
}

impl ForecastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from_path(&path)
    }

    /// Load configuration from the given file, if it exists, then apply
    /// `FORECAST__SECTION__KEY` environment overrides
    pub fn load_from_path(config_file: &std::path::Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                Environment::with_prefix("FORECAST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ForecastConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("geocoder", &self.upstream.geocoder_base_url),
            ("weather", &self.upstream.weather_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::invalid(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                )));
            }
        }

        if self.upstream.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("User agent cannot be empty"));
        }

        if self.upstream.timeout_seconds == 0 || self.upstream.timeout_seconds > 300 {
            return Err(ConfigError::invalid(
                "Upstream timeout must be between 1 and 300 seconds",
            ));
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::invalid(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ForecastConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(
            config.upstream.geocoder_base_url,
            "https://geocoding.geo.census.gov/geocoder"
        );
        assert_eq!(config.upstream.census_benchmark, "2020");
        assert_eq!(config.upstream.weather_base_url, "https://api.weather.gov");
        assert_eq!(config.logging.level, "info");
        assert!(config.server.static_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = ForecastConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_url() {
        let mut config = ForecastConfig::default();
        config.upstream.weather_base_url = "api.weather.gov".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("weather base URL"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = ForecastConfig::default();
        config.upstream.timeout_seconds = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_user_agent() {
        let mut config = ForecastConfig::default();
        config.upstream.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config =
            ForecastConfig::load_from_path(std::path::Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("forecast-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\n\n[upstream]\nuser_agent = \"test-agent\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = ForecastConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.upstream.user_agent, "test-agent");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
