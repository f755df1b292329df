//! Configuration management for the place explorer workflow
//!
//! Handles loading configuration from files and environment variables and
//! provides validation for all configuration settings. The application is
//! stateless across runs; configuration only tunes provider endpoints,
//! timeouts, and the bundled default location.

use crate::ExplorerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExplorerConfig {
    /// Geocoding provider (forward + reverse) settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Network-address location lookup settings
    #[serde(default)]
    pub network_location: NetworkLocationConfig,
    /// Place search tuning
    #[serde(default)]
    pub search: SearchConfig,
    /// Bundled fallback location used when every resolution tier fails
    #[serde(default)]
    pub default_location: DefaultLocationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the Nominatim-compatible service
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent with every request (required by Nominatim usage policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Network-address location lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkLocationConfig {
    /// Primary provider endpoint (ipapi.co response shape)
    #[serde(default = "default_primary_lookup_url")]
    pub primary_url: String,
    /// Secondary provider endpoint (ip-api.com response shape)
    #[serde(default = "default_secondary_lookup_url")]
    pub secondary_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u32,
}

/// Place search tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Half-width in degrees of the bounding box around the bias location
    #[serde(default = "default_bias_half_width")]
    pub bias_half_width_deg: f64,
    /// Result cap for the biased (bounded) search
    #[serde(default = "default_biased_limit")]
    pub biased_limit: u8,
    /// Result cap for the unbounded fallback search
    #[serde(default = "default_fallback_limit")]
    pub fallback_limit: u8,
    /// How many results the conversation shows per response
    #[serde(default = "default_display_cap")]
    pub display_cap: usize,
    /// Region name appended to fallback queries when no location name exists
    #[serde(default = "default_fallback_region")]
    pub fallback_region: String,
    /// Device sensor wait in seconds before falling back
    #[serde(default = "default_sensor_timeout")]
    pub sensor_timeout_seconds: u32,
}

/// Bundled fallback location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultLocationConfig {
    #[serde(default = "default_location_latitude")]
    pub latitude: f64,
    #[serde(default = "default_location_longitude")]
    pub longitude: f64,
    #[serde(default = "default_location_name")]
    pub name: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    concat!("PlaceExplorer/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_primary_lookup_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_secondary_lookup_url() -> String {
    "https://ip-api.com/json/?fields=lat,lon,city,regionName,country".to_string()
}

fn default_request_timeout() -> u32 {
    30
}

fn default_bias_half_width() -> f64 {
    0.15
}

fn default_biased_limit() -> u8 {
    10
}

fn default_fallback_limit() -> u8 {
    8
}

fn default_display_cap() -> usize {
    6
}

fn default_fallback_region() -> String {
    "India".to_string()
}

fn default_sensor_timeout() -> u32 {
    10
}

fn default_location_latitude() -> f64 {
    21.1702
}

fn default_location_longitude() -> f64 {
    72.8311
}

fn default_location_name() -> String {
    "Surat".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for NetworkLocationConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_lookup_url(),
            secondary_url: default_secondary_lookup_url(),
            timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bias_half_width_deg: default_bias_half_width(),
            biased_limit: default_biased_limit(),
            fallback_limit: default_fallback_limit(),
            display_cap: default_display_cap(),
            fallback_region: default_fallback_region(),
            sensor_timeout_seconds: default_sensor_timeout(),
        }
    }
}

impl Default for DefaultLocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_location_latitude(),
            longitude: default_location_longitude(),
            name: default_location_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ExplorerConfig {
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

        // Environment overrides with PLACE_EXPLORER_ prefix
        builder = builder.add_source(
            Environment::with_prefix("PLACE_EXPLORER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: ExplorerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("place-explorer").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        for (label, url) in [
            ("Geocoding base URL", &self.geocoding.base_url),
            ("Primary lookup URL", &self.network_location.primary_url),
            ("Secondary lookup URL", &self.network_location.secondary_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ExplorerError::config(format!(
                    "{label} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.default_location.latitude)
            || !(-180.0..=180.0).contains(&self.default_location.longitude)
        {
            return Err(ExplorerError::config(
                "Default location coordinates are out of range",
            )
            .into());
        }

        if self.search.bias_half_width_deg <= 0.0 || self.search.bias_half_width_deg > 10.0 {
            return Err(ExplorerError::config(
                "Search bias half-width must be between 0 and 10 degrees",
            )
            .into());
        }

        if self.search.biased_limit == 0 || self.search.biased_limit > 50 {
            return Err(ExplorerError::config(
                "Biased search limit must be between 1 and 50",
            )
            .into());
        }

        if self.search.fallback_limit == 0 || self.search.fallback_limit > 50 {
            return Err(ExplorerError::config(
                "Fallback search limit must be between 1 and 50",
            )
            .into());
        }

        if self.search.display_cap == 0 {
            return Err(ExplorerError::config("Display cap must be at least 1").into());
        }

        if self.geocoding.timeout_seconds > 300 || self.network_location.timeout_seconds > 300 {
            return Err(ExplorerError::config("Request timeout cannot exceed 300 seconds").into());
        }

        if self.search.sensor_timeout_seconds == 0 || self.search.sensor_timeout_seconds > 120 {
            return Err(ExplorerError::config(
                "Sensor timeout must be between 1 and 120 seconds",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if self.default_location.name.is_empty() {
            return Err(ExplorerError::config("Default location name cannot be empty").into());
        }

        if self.geocoding.user_agent.is_empty() {
            return Err(ExplorerError::config("Geocoding user agent cannot be empty").into());
        }

        Ok(())
    }

    /// Install a global tracing subscriber honoring the configured level
    ///
    /// `RUST_LOG` still wins when set. Returns quietly if a subscriber is
    /// already installed, so tests can call this repeatedly.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.logging.level.clone()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    }
}
