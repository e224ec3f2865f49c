//! Configuration management for the wxboard dashboard
//!
//! Handles loading configuration from files and environment variables, and
//! validates all settings. The page schema lives here on purpose: positional
//! table selection and label strings are a fragile coupling to the source
//! page layout and must stay configuration, not literals in the parser.

use crate::scrape::PageSchema;
use crate::WxError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the wxboard application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WxboardConfig {
    /// Forecast page source configuration (URLs, schema, timeout)
    #[serde(default)]
    pub source: SourceConfig,
    /// Geocoding lookup configuration
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    /// Display and export policy
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Forecast page source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the forecast service
    #[serde(default = "default_source_base_url")]
    pub base_url: String,
    /// Descriptive client identifier sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// 0-based position of the digital forecast table among all tables on
    /// the page. Brittle by construction; kept configurable so a layout
    /// change is a config edit, not a code change.
    #[serde(default = "default_digital_table_index")]
    pub digital_table_index: usize,
    /// Label of the sparse date row
    #[serde(default = "default_date_label")]
    pub date_label: String,
    /// Prefix of the hour row label (the suffix carries the timezone)
    #[serde(default = "default_hour_prefix")]
    pub hour_prefix: String,
    /// Label of the temperature row
    #[serde(default = "default_temperature_label")]
    pub temperature_label: String,
    /// Label of the surface wind row
    #[serde(default = "default_wind_label")]
    pub wind_label: String,
    /// Label of the relative humidity row
    #[serde(default = "default_humidity_label")]
    pub humidity_label: String,
}

/// Geocoding lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL of the geocoding service
    #[serde(default = "default_geocoder_base_url")]
    pub base_url: String,
    /// Minimum interval between outbound requests in milliseconds.
    /// Nominatim's usage policy asks for at most one request per second.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

/// Display and export policy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of leading records shown in the summary table
    #[serde(default = "default_window")]
    pub window: usize,
    /// Path of the CSV export, overwritten each cycle
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
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

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of static frontend assets
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

// Default value functions
fn default_source_base_url() -> String {
    "https://forecast.weather.gov".to_string()
}

fn default_user_agent() -> String {
    format!("wxboard/{} (weather dashboard)", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u32 {
    10
}

fn default_digital_table_index() -> usize {
    5
}

fn default_date_label() -> String {
    "Date".to_string()
}

fn default_hour_prefix() -> String {
    "Hour (".to_string()
}

fn default_temperature_label() -> String {
    "Temperature (°F)".to_string()
}

fn default_wind_label() -> String {
    "Surface Wind (mph)".to_string()
}

fn default_humidity_label() -> String {
    "Relative Humidity (%)".to_string()
}

fn default_geocoder_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_min_interval_ms() -> u64 {
    1000
}

fn default_window() -> usize {
    10
}

fn default_csv_path() -> String {
    "weather_data.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_frontend_dir() -> String {
    "frontend/dist".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            digital_table_index: default_digital_table_index(),
            date_label: default_date_label(),
            hour_prefix: default_hour_prefix(),
            temperature_label: default_temperature_label(),
            wind_label: default_wind_label(),
            humidity_label: default_humidity_label(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_base_url(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            csv_path: default_csv_path(),
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

impl SourceConfig {
    /// Build the injectable page schema for the digital forecast parser.
    #[must_use]
    pub fn page_schema(&self) -> PageSchema {
        PageSchema {
            table_index: self.digital_table_index,
            date_label: self.date_label.clone(),
            hour_prefix: self.hour_prefix.clone(),
            temperature_label: self.temperature_label.clone(),
            wind_label: self.wind_label.clone(),
            humidity_label: self.humidity_label.clone(),
        }
    }
}

impl WxboardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with WXBOARD_ prefix
        builder = builder.add_source(
            Environment::with_prefix("WXBOARD")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WxboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wxboard").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.source.timeout_seconds == 0 || self.source.timeout_seconds > 300 {
            return Err(
                WxError::config("Request timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.display.window == 0 {
            return Err(WxError::config("Display window must be at least 1 record").into());
        }

        if self.geocoder.min_interval_ms > 60_000 {
            return Err(
                WxError::config("Geocoder minimum interval cannot exceed 60 seconds").into(),
            );
        }

        for (name, url) in [
            ("source", &self.source.base_url),
            ("geocoder", &self.geocoder.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WxError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        for (name, label) in [
            ("date", &self.source.date_label),
            ("hour", &self.source.hour_prefix),
            ("temperature", &self.source.temperature_label),
            ("wind", &self.source.wind_label),
            ("humidity", &self.source.humidity_label),
        ] {
            if label.is_empty() {
                return Err(
                    WxError::config(format!("{name} row label cannot be empty")).into(),
                );
            }
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WxError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WxError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Create configuration directory if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            let wxboard_config_dir = config_dir.join("wxboard");
            std::fs::create_dir_all(&wxboard_config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    wxboard_config_dir.display()
                )
            })?;
            Ok(wxboard_config_dir)
        } else {
            Err(WxError::config("Unable to determine config directory").into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WxboardConfig::default();
        assert_eq!(config.source.base_url, "https://forecast.weather.gov");
        assert_eq!(config.source.timeout_seconds, 10);
        assert_eq!(config.source.digital_table_index, 5);
        assert_eq!(
            config.geocoder.base_url,
            "https://nominatim.openstreetmap.org"
        );
        assert_eq!(config.geocoder.min_interval_ms, 1000);
        assert_eq!(config.display.window, 10);
        assert_eq!(config.display.csv_path, "weather_data.csv");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = WxboardConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_page_schema_from_source_config() {
        let config = WxboardConfig::default();
        let schema = config.source.page_schema();
        assert_eq!(schema.table_index, 5);
        assert_eq!(schema.date_label, "Date");
        assert_eq!(schema.hour_prefix, "Hour (");
        assert_eq!(schema.temperature_label, "Temperature (°F)");
        assert_eq!(schema.wind_label, "Surface Wind (mph)");
        assert_eq!(schema.humidity_label, "Relative Humidity (%)");
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = WxboardConfig::default();
        config.source.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("timeout must be between"));
    }

    #[test]
    fn test_config_validation_empty_window() {
        let mut config = WxboardConfig::default();
        config.display.window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WxboardConfig::default();
        config.logging.level = "chatty".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = WxboardConfig::default();
        config.source.base_url = "ftp://forecast.weather.gov".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_label() {
        let mut config = WxboardConfig::default();
        config.source.wind_label = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("wind row label cannot be empty"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = WxboardConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("wxboard"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
