//! System-wide default constants.
//!
//! Every tunable in `NoiseConfig` takes its default from here. Grouped by
//! subsystem.

// ============================================================================
// Generator
// ============================================================================

/// Offset used for hour-of-day bucketing, minutes east of UTC.
///
/// 330 = UTC+05:30 (India Standard Time), matching the city catalog.
pub const UTC_OFFSET_MINUTES: i32 = 330;

// ============================================================================
// Query
// ============================================================================

/// Radius of the "local" reading set around the user (km).
pub const LOCAL_RADIUS_KM: f64 = 5.0;

/// Radius of the "nearby" reading set around the user (km).
pub const NEARBY_RADIUS_KM: f64 = 20.0;

/// Lower bound of the default decibel filter.
pub const MIN_DECIBEL: f64 = 0.0;

/// Upper bound of the default decibel filter.
pub const MAX_DECIBEL: f64 = 150.0;

// ============================================================================
// Refresh
// ============================================================================

/// Local readings and analytics refresh period (seconds).
pub const LOCAL_REFRESH_INTERVAL_SECS: u64 = 60;

/// Nearby readings refresh period (seconds). 7 200 = 2 hours.
pub const NEARBY_REFRESH_INTERVAL_SECS: u64 = 7_200;

/// Upper bound on a single geolocation request (seconds).
pub const GEOLOCATION_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Location Fallback
// ============================================================================

/// Position reported when no geolocation source is configured (New Delhi).
pub const FALLBACK_LATITUDE: f64 = 28.6139;
pub const FALLBACK_LONGITUDE: f64 = 77.2090;

/// Accuracy attached to the fallback position (metres).
pub const FALLBACK_ACCURACY_M: f64 = 1_000.0;

// ============================================================================
// Reverse Geocoding
// ============================================================================

pub const GEOCODING_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying agent.
pub const GEOCODING_USER_AGENT: &str = concat!("noise-atlas/", env!("CARGO_PKG_VERSION"));

pub const GEOCODING_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Server
// ============================================================================

pub const SERVER_ADDR: &str = "0.0.0.0:8080";
