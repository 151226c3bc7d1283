//! Fixed location catalogs for the synthetic generator.

use crate::types::GeoPoint;

/// A named location at a fixed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityEntry {
    pub name: &'static str,
    pub location: GeoPoint,
    /// Nominal ambient level before time-of-day adjustment (dB)
    pub base_decibel: f64,
}

/// A named area positioned relative to a caller-supplied center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaEntry {
    pub name: &'static str,
    /// Latitude/longitude offset from the center (degrees)
    pub offset: GeoPoint,
    pub base_decibel: f64,
}

/// Major cities, always generated.
pub const MAJOR_CITIES: [CityEntry; 6] = [
    CityEntry {
        name: "Delhi",
        location: GeoPoint::new(28.6139, 77.2090),
        base_decibel: 85.0,
    },
    CityEntry {
        name: "Mumbai",
        location: GeoPoint::new(19.0760, 72.8777),
        base_decibel: 82.0,
    },
    CityEntry {
        name: "Bangalore",
        location: GeoPoint::new(12.9716, 77.5946),
        base_decibel: 78.0,
    },
    CityEntry {
        name: "Chennai",
        location: GeoPoint::new(13.0827, 80.2707),
        base_decibel: 76.0,
    },
    CityEntry {
        name: "Kolkata",
        location: GeoPoint::new(22.5726, 88.3639),
        base_decibel: 80.0,
    },
    CityEntry {
        name: "Hyderabad",
        location: GeoPoint::new(17.3850, 78.4867),
        base_decibel: 77.0,
    },
];

/// Areas generated around the query center when one is supplied.
pub const NEARBY_AREAS: [AreaEntry; 6] = [
    AreaEntry {
        name: "Tambaram",
        offset: GeoPoint::new(-0.05, 0.02),
        base_decibel: 72.0,
    },
    AreaEntry {
        name: "Vandalur",
        offset: GeoPoint::new(-0.08, 0.03),
        base_decibel: 68.0,
    },
    AreaEntry {
        name: "Perungalathur",
        offset: GeoPoint::new(-0.06, 0.01),
        base_decibel: 70.0,
    },
    AreaEntry {
        name: "Chromepet",
        offset: GeoPoint::new(-0.04, 0.02),
        base_decibel: 75.0,
    },
    AreaEntry {
        name: "Pallavaram",
        offset: GeoPoint::new(-0.03, 0.01),
        base_decibel: 73.0,
    },
    AreaEntry {
        name: "Guduvanchery",
        offset: GeoPoint::new(-0.09, 0.02),
        base_decibel: 65.0,
    },
];
