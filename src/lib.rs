//! Noise Atlas: noise-pollution mapping engine
//!
//! Synthesizes decibel readings for Indian cities and the areas around a
//! user, clusters them into hotspots and derives exposure analytics.
//!
//! ## Architecture
//!
//! - **Engines** (pure, synchronous): `synthetic`, `query`, `hotspots`,
//!   `analytics`, `geo`
//! - **Collaborators** (async, fail softly): `location`
//! - **Runtime**: `refresh` drives periodic updates of a shared dashboard
//!   snapshot, `api` serves it over HTTP
//! - **Ambient**: `config`, `clock`, `contacts`, `meter`

pub mod analytics;
pub mod api;
pub mod clock;
pub mod config;
pub mod contacts;
pub mod geo;
pub mod hotspots;
pub mod location;
pub mod meter;
pub mod query;
pub mod refresh;
pub mod synthetic;
pub mod types;

// Re-export configuration
pub use config::NoiseConfig;

// Re-export commonly used types
pub use types::{
    FilterCriteria, GeoPoint, HealthImpact, Hotspot, NewReading, NoiseAnalysis, NoisePrediction,
    PatternType, Reading, RegionBounds, RiskLevel, TimeRange, UserLocation,
};

// Re-export engine entry points
pub use analytics::{analyze_pattern, health_impact, predict_next_day};
pub use geo::{distance_km, is_within_region};
pub use hotspots::build_hotspots;
pub use query::{get_readings, submit_reading};
pub use synthetic::ReadingGenerator;
