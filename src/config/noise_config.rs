//! Noise Atlas configuration: every tunable as a TOML value
//!
//! Each section implements `Default` with the values in `config::defaults`,
//! so a missing file or a partial file behaves exactly like the built-ins.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::defaults;
use super::validation::{validate_ranges, validate_unknown_keys};
use crate::clock::offset_from_minutes;
use crate::types::UserLocation;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "NOISE_ATLAS_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "noise_atlas.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `NoiseConfig::load()` which searches:
/// 1. `$NOISE_ATLAS_CONFIG`
/// 2. `./noise_atlas.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Position used when no live geolocation source exists
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub geocoding: GeocodingConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl NoiseConfig {
    /// Load configuration using the standard search order.
    pub fn load() -> Self {
        let env_path = std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from);
        Self::load_from_candidates(env_path.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// Search order with explicit paths: `env_path` if given, then `local`,
    /// then defaults. A file that fails to load is logged and skipped.
    pub fn load_from_candidates(env_path: Option<&Path>, local: &Path) -> Self {
        // 1. Explicit path
        if let Some(p) = env_path {
            if p.exists() {
                match Self::load_from_file(p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {}, falling back",
                            CONFIG_ENV_VAR
                        );
                    }
                }
            } else {
                warn!(
                    path = %p.display(),
                    "{} points to non-existent file, falling back",
                    CONFIG_ENV_VAR
                );
            }
        }

        // 2. Working-directory file
        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    info!(path = %local.display(), "Loaded config");
                    return config;
                }
                Err(e) => {
                    warn!(
                        path = %local.display(),
                        error = %e,
                        "Failed to load config, using defaults"
                    );
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are logged as warnings; range errors reject the file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        for w in validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Reject impossible values; log suspicious ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Generator
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Minutes east of UTC used for hour-of-day bucketing
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Fixed RNG seed; entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_utc_offset_minutes() -> i32 {
    defaults::UTC_OFFSET_MINUTES
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn utc_offset(&self) -> FixedOffset {
        offset_from_minutes(self.utc_offset_minutes)
    }
}

// ============================================================================
// Query
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_local_radius_km")]
    pub local_radius_km: f64,

    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,

    #[serde(default = "default_min_decibel")]
    pub min_decibel: f64,

    #[serde(default = "default_max_decibel")]
    pub max_decibel: f64,
}

fn default_local_radius_km() -> f64 {
    defaults::LOCAL_RADIUS_KM
}
fn default_nearby_radius_km() -> f64 {
    defaults::NEARBY_RADIUS_KM
}
fn default_min_decibel() -> f64 {
    defaults::MIN_DECIBEL
}
fn default_max_decibel() -> f64 {
    defaults::MAX_DECIBEL
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            local_radius_km: default_local_radius_km(),
            nearby_radius_km: default_nearby_radius_km(),
            min_decibel: default_min_decibel(),
            max_decibel: default_max_decibel(),
        }
    }
}

// ============================================================================
// Refresh
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_local_interval_secs")]
    pub local_interval_secs: u64,

    #[serde(default = "default_nearby_interval_secs")]
    pub nearby_interval_secs: u64,

    #[serde(default = "default_geolocation_timeout_secs")]
    pub geolocation_timeout_secs: u64,
}

fn default_local_interval_secs() -> u64 {
    defaults::LOCAL_REFRESH_INTERVAL_SECS
}
fn default_nearby_interval_secs() -> u64 {
    defaults::NEARBY_REFRESH_INTERVAL_SECS
}
fn default_geolocation_timeout_secs() -> u64 {
    defaults::GEOLOCATION_TIMEOUT_SECS
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            local_interval_secs: default_local_interval_secs(),
            nearby_interval_secs: default_nearby_interval_secs(),
            geolocation_timeout_secs: default_geolocation_timeout_secs(),
        }
    }
}

impl RefreshConfig {
    pub fn local_interval(&self) -> Duration {
        Duration::from_secs(self.local_interval_secs)
    }

    pub fn nearby_interval(&self) -> Duration {
        Duration::from_secs(self.nearby_interval_secs)
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }
}

// ============================================================================
// Location Fallback
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    #[serde(default = "default_accuracy_m")]
    pub accuracy_m: f64,
}

fn default_latitude() -> f64 {
    defaults::FALLBACK_LATITUDE
}
fn default_longitude() -> f64 {
    defaults::FALLBACK_LONGITUDE
}
fn default_accuracy_m() -> f64 {
    defaults::FALLBACK_ACCURACY_M
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            accuracy_m: default_accuracy_m(),
        }
    }
}

impl LocationConfig {
    pub fn user_location(&self) -> UserLocation {
        UserLocation::new(self.latitude, self.longitude, self.accuracy_m)
    }
}

// ============================================================================
// Reverse Geocoding
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// When false, place names resolve to "Unknown Location" without a request
    #[serde(default = "default_geocoding_enabled")]
    pub enabled: bool,

    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_enabled() -> bool {
    true
}
fn default_geocoding_endpoint() -> String {
    defaults::GEOCODING_ENDPOINT.to_string()
}
fn default_user_agent() -> String {
    defaults::GEOCODING_USER_AGENT.to_string()
}
fn default_geocoding_timeout_secs() -> u64 {
    defaults::GEOCODING_TIMEOUT_SECS
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: default_geocoding_enabled(),
            endpoint: default_geocoding_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_geocoding_timeout_secs(),
        }
    }
}

impl GeocodingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `NOISE_ATLAS_ADDR` or `--addr`.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
