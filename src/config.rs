//! Configuration management for `climate-compare`
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and provides validation for all configuration settings.

use crate::ClimateError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix, e.g. `CLIMATE_COMPARE_API__TIMEOUT_SECONDS=10`
pub const ENV_PREFIX: &str = "CLIMATE_COMPARE";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "climate-compare.toml";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClimateConfig {
    /// Open-Meteo endpoints and transport settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Response cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default query settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the geocoding API
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Base URL of the historical archive API
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    /// Base URL of the forecast API
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// IANA timezone the daily aggregates are computed in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether HTTP responses are cached on disk
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
    /// Lifetime of cached forecast responses in seconds
    #[serde(default = "default_forecast_ttl")]
    pub forecast_ttl_seconds: u64,
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

/// Default query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Year the historical extremes are taken from
    #[serde(default = "default_year")]
    pub year: i32,
    /// Use leap-aware month offsets instead of the fixed 28-day February table
    #[serde(default)]
    pub leap_aware_months: bool,
}

// Default value functions
fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_archive_url() -> String {
    "https://archive-api.open-meteo.com/v1".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_retries() -> u32 {
    5
}

fn default_timezone() -> String {
    "America/Los_Angeles".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_location() -> String {
    ".cache".to_string()
}

fn default_forecast_ttl() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_year() -> i32 {
    crate::weather::DEFAULT_YEAR
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            archive_url: default_archive_url(),
            forecast_url: default_forecast_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            timezone: default_timezone(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            location: default_cache_location(),
            forecast_ttl_seconds: default_forecast_ttl(),
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

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            leap_aware_months: false,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn forecast_ttl(&self) -> Duration {
        Duration::from_secs(self.forecast_ttl_seconds)
    }
}

/// `CLIMATE_COMPARE_<SECTION>__<KEY>` variables
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl ClimateConfig {
    /// Load configuration from specified path and the process environment
    pub fn load_from_path(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_environment(config_path, environment())
    }

    fn load_with_environment(config_path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        } else if config_path.is_some() {
            return Err(ClimateError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        builder = builder.add_source(environment);

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ClimateConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.geocoding_url.is_empty() {
            self.api.geocoding_url = default_geocoding_url();
        }
        if self.api.archive_url.is_empty() {
            self.api.archive_url = default_archive_url();
        }
        if self.api.forecast_url.is_empty() {
            self.api.forecast_url = default_forecast_url();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_timeout();
        }
        if self.api.timezone.is_empty() {
            self.api.timezone = default_timezone();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(ClimateError::config("API timeout cannot exceed 300 seconds").into());
        }

        if self.api.max_retries > 10 {
            return Err(ClimateError::config("API max retries cannot exceed 10").into());
        }

        // The archive starts in 1940
        if !(1940..=9999).contains(&self.defaults.year) {
            return Err(ClimateError::config(format!(
                "Default year {} is outside 1940..=9999",
                self.defaults.year
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ClimateError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ClimateError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("geocoding", &self.api.geocoding_url),
            ("archive", &self.api.archive_url),
            ("forecast", &self.api.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ClimateError::config(format!(
                    "The {name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.api.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ClimateError::config(format!(
                "Unknown timezone '{}'",
                self.api.timezone
            ))
            .into());
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
        let config = ClimateConfig::default();
        assert_eq!(config.api.archive_url, "https://archive-api.open-meteo.com/v1");
        assert_eq!(config.api.max_retries, 5);
        assert_eq!(config.api.timezone, "America/Los_Angeles");
        assert_eq!(config.cache.forecast_ttl(), Duration::from_secs(3600));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.year, 2023);
        assert!(!config.defaults.leap_aware_months);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = ClimateConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = ClimateConfig::default();
        config.api.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = ClimateConfig::default();
        config.defaults.year = 1800;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_timezone() {
        let mut config = ClimateConfig::default();
        config.api.timezone = "Mars/Olympus_Mons".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Unknown timezone"));
    }

    #[test]
    fn test_config_validation_url_scheme() {
        let mut config = ClimateConfig::default();
        config.api.forecast_url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("forecast base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = ClimateConfig::default();
        config.api.timezone.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.api.timezone, "America/Los_Angeles");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let vars = config::Map::from([
            ("CLIMATE_COMPARE_API__TIMEOUT_SECONDS".to_string(), "10".to_string()),
            ("CLIMATE_COMPARE_DEFAULTS__YEAR".to_string(), "2022".to_string()),
            ("CLIMATE_COMPARE_LOGGING__FORMAT".to_string(), "json".to_string()),
        ]);

        let config =
            ClimateConfig::load_with_environment(None, environment().source(Some(vars))).unwrap();

        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.defaults.year, 2022);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\ntimeout_seconds = 10\n\n[defaults]\nyear = 2022\nleap_aware_months = true"
        )
        .unwrap();
        file.flush().unwrap();

        let config = ClimateConfig::load_from_path(Some(file.path())).unwrap();

        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.defaults.year, 2022);
        assert!(config.defaults.leap_aware_months);
        assert_eq!(config.api.max_retries, 5);
    }

    #[test]
    fn test_load_from_missing_explicit_path() {
        let result = ClimateConfig::load_from_path(Some(Path::new("/nonexistent/climate.toml")));
        assert!(result.unwrap_err().to_string().contains("Config file not found"));
    }
}
