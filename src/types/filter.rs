//! Query criteria for the reading engine

use serde::{Deserialize, Serialize};

use super::UserLocation;

/// Time window requested by the caller.
///
/// Only `Day` is produced by the generator; the other variants are
/// accepted and behave identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Day => write!(f, "day"),
            TimeRange::Week => write!(f, "week"),
            TimeRange::Month => write!(f, "month"),
            TimeRange::Year => write!(f, "year"),
            TimeRange::All => write!(f, "all"),
        }
    }
}

/// Value object describing a reading query. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub time_range: TimeRange,
    /// Inclusive lower decibel bound
    pub min_decibel: f64,
    /// Inclusive upper decibel bound
    pub max_decibel: f64,
    /// Free-form region label (not used for filtering)
    #[serde(default)]
    pub region: Option<String>,
    /// Anchor for the nearby-area catalog and the radius filter
    #[serde(default)]
    pub center: Option<UserLocation>,
    /// Maximum great-circle distance from `center` (km)
    #[serde(default)]
    pub radius_km: Option<f64>,
}

impl FilterCriteria {
    /// Criteria with the given decibel bounds and no spatial restriction.
    pub fn decibel_range(min_decibel: f64, max_decibel: f64) -> Self {
        Self {
            time_range: TimeRange::Day,
            min_decibel,
            max_decibel,
            region: None,
            center: None,
            radius_km: None,
        }
    }

    /// Anchor the query at `center`, optionally limited to `radius_km`.
    pub fn around(mut self, center: UserLocation, radius_km: Option<f64>) -> Self {
        self.center = Some(center);
        self.radius_km = radius_km;
        self
    }
}
