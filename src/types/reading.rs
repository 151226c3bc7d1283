//! Reading and Hotspot types

use serde::{Deserialize, Serialize};

/// Device tag applied to generated catalog readings.
pub const DEVICE_STATIC: &str = "static";

/// Device tag applied to readings recorded through the noise meter.
pub const DEVICE_MOBILE: &str = "mobile";

/// A point-in-time noise sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Opaque id, unique within a generated batch
    pub id: String,
    /// Latitude (degrees)
    pub latitude: f64,
    /// Longitude (degrees)
    pub longitude: f64,
    /// Sound level (dB), conceptually 0-150 but not bounded
    pub decibel: f64,
    /// Capture time, milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Free-form device tag ("static", "mobile", ...)
    pub device_type: String,
    /// Submitting user, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Display name of the owning location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
}

/// A reading as provided by a caller before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    pub latitude: f64,
    pub longitude: f64,
    pub decibel: f64,
    pub timestamp: i64,
    pub device_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
}

impl NewReading {
    /// Attach an id, producing a complete reading.
    pub fn with_id(self, id: String) -> Reading {
        Reading {
            id,
            latitude: self.latitude,
            longitude: self.longitude,
            decibel: self.decibel,
            timestamp: self.timestamp,
            device_type: self.device_type,
            user_id: self.user_id,
            city_name: self.city_name,
        }
    }
}

/// Spatial aggregate of one or more readings.
///
/// Computed fresh on every clustering pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// `hotspot-N`, 1-based in output order
    pub id: String,
    /// Mean latitude of the members
    pub latitude: f64,
    /// Mean longitude of the members
    pub longitude: f64,
    /// Mean decibel of the members
    pub average_decibel: f64,
    /// Number of member readings
    pub reading_count: usize,
    /// Display radius (metres); fixed, not derived from member spread
    pub radius: f64,
    /// Name inherited from the seed reading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    /// Ids of the member readings, seed first
    pub member_ids: Vec<String>,
}
