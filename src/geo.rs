//! Geodesy utilities: great-circle distance and bounding-box containment.

use crate::types::RegionBounds;

/// Mean Earth radius (km) used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Coverage region for the city catalog and complaint directory.
pub const REFERENCE_REGION: RegionBounds = RegionBounds {
    north: 35.5087,
    south: 6.7535,
    east: 97.3956,
    west: 68.1766,
};

/// Great-circle distance in kilometres (haversine).
///
/// Radius filters and hotspot membership both depend on this being
/// monotonic in true separation; all inputs are accepted, none are validated.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin() * (dlat / 2.0).sin()
        + lat1.to_radians().cos()
            * lat2.to_radians().cos()
            * (dlon / 2.0).sin()
            * (dlon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Inclusive bounding-box containment.
pub fn is_within_region(lat: f64, lon: f64, bounds: &RegionBounds) -> bool {
    lat <= bounds.north && lat >= bounds.south && lon <= bounds.east && lon >= bounds.west
}
