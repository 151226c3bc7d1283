//! Engine Property Tests
//!
//! Cross-module properties of the reading, clustering and analytics
//! engines, exercised through the public crate API only.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use noise_atlas::analytics::ReadingStats;
use noise_atlas::clock::{offset_from_minutes, HOUR_MS};
use noise_atlas::hotspots::CLUSTER_RADIUS_KM;
use noise_atlas::types::{Reading, DEVICE_STATIC};
use noise_atlas::{
    analyze_pattern, build_hotspots, distance_km, get_readings, health_impact, predict_next_day,
    FilterCriteria, ReadingGenerator, RiskLevel, UserLocation,
};

// 2024-03-15T06:30:00Z
const NOW: i64 = 1_710_484_200_000;

fn generator(seed: u64) -> ReadingGenerator {
    ReadingGenerator::new(offset_from_minutes(330), Some(seed))
}

fn centers() -> Vec<UserLocation> {
    vec![
        UserLocation::new(12.9, 80.1, 10.0),
        UserLocation::new(28.6139, 77.2090, 10.0),
        UserLocation::new(19.0760, 72.8777, 10.0),
        UserLocation::new(22.5, 88.4, 10.0),
    ]
}

fn flat_reading(id: usize, decibel: f64, timestamp: i64) -> Reading {
    Reading {
        id: format!("flat-{id}"),
        latitude: 12.9,
        longitude: 80.1,
        decibel,
        timestamp,
        device_type: DEVICE_STATIC.to_string(),
        user_id: None,
        city_name: None,
    }
}

// ============================================================================
// Query
// ============================================================================

#[test]
fn query_never_returns_readings_outside_decibel_bounds() {
    for (seed, (min, max)) in [(1, (60.0, 70.0)), (2, (75.0, 75.0)), (3, (0.0, 65.5))] {
        for center in centers() {
            let criteria = FilterCriteria::decibel_range(min, max).around(center, Some(20.0));
            for r in get_readings(&criteria, &mut generator(seed), NOW) {
                assert!(
                    r.decibel >= min && r.decibel <= max,
                    "{} dB outside {min}..={max}",
                    r.decibel
                );
            }
        }
    }
}

#[test]
fn query_never_returns_readings_outside_radius() {
    for radius in [0.5, 2.0, 5.0, 20.0, 500.0] {
        for center in centers() {
            let criteria = FilterCriteria::decibel_range(0.0, 150.0).around(center, Some(radius));
            for r in get_readings(&criteria, &mut generator(9), NOW) {
                let d = distance_km(center.latitude, center.longitude, r.latitude, r.longitude);
                assert!(d <= radius, "{} is {d:.2} km from center, radius {radius}", r.id);
            }
        }
    }
}

#[test]
fn impossible_decibel_range_is_empty() {
    for center in centers() {
        let criteria = FilterCriteria::decibel_range(200.0, 210.0).around(center, None);
        assert!(get_readings(&criteria, &mut generator(4), NOW).is_empty());
    }
}

#[test]
fn batch_ids_are_unique() {
    let criteria = FilterCriteria::decibel_range(0.0, 150.0).around(centers()[0], None);
    let readings = get_readings(&criteria, &mut generator(6), NOW);
    let ids: HashSet<_> = readings.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), readings.len());
}

#[test]
fn same_seed_same_readings() {
    let criteria = FilterCriteria::decibel_range(0.0, 150.0).around(centers()[1], Some(20.0));
    let a = get_readings(&criteria, &mut generator(77), NOW);
    let b = get_readings(&criteria, &mut generator(77), NOW);
    assert_eq!(a, b);
}

// ============================================================================
// Hotspots
// ============================================================================

#[test]
fn hotspots_partition_generated_readings() {
    for center in centers() {
        let criteria = FilterCriteria::decibel_range(0.0, 150.0).around(center, Some(20.0));
        let readings = get_readings(&criteria, &mut generator(12), NOW);
        let hotspots = build_hotspots(&readings);

        let total: usize = hotspots.iter().map(|h| h.reading_count).sum();
        assert_eq!(total, readings.len());

        let mut seen = HashSet::new();
        for h in &hotspots {
            for id in &h.member_ids {
                assert!(seen.insert(id.clone()), "{id} in two hotspots");
            }
        }
    }
}

#[test]
fn hotspot_members_are_near_their_seed() {
    let criteria = FilterCriteria::decibel_range(0.0, 150.0).around(centers()[0], None);
    let readings = get_readings(&criteria, &mut generator(13), NOW);

    for h in build_hotspots(&readings) {
        let find = |id: &str| readings.iter().find(|r| r.id == id);
        let Some(seed) = find(&h.member_ids[0]) else {
            panic!("seed {} missing", h.member_ids[0]);
        };
        for id in &h.member_ids {
            let Some(m) = find(id) else {
                panic!("member {id} missing");
            };
            let d = distance_km(seed.latitude, seed.longitude, m.latitude, m.longitude);
            assert!(d <= CLUSTER_RADIUS_KM, "{id} is {d:.2} km from its seed");
        }
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[test]
fn health_risk_tiers() {
    let tier = |db: f64| {
        let readings: Vec<_> = (0..5).map(|i| flat_reading(i, db, NOW)).collect();
        health_impact(&readings, NOW).risk_level
    };
    assert_eq!(tier(60.0), RiskLevel::Low);
    assert_eq!(tier(70.0), RiskLevel::Moderate);
    assert_eq!(tier(90.0), RiskLevel::High);
}

#[test]
fn prediction_from_two_hours_is_complete_and_finite() {
    let readings = vec![
        flat_reading(0, 72.0, NOW),
        flat_reading(1, 78.0, NOW - HOUR_MS),
        flat_reading(2, 74.0, NOW - HOUR_MS + 1_000),
    ];
    let mut rng = StdRng::seed_from_u64(2);
    let prediction = predict_next_day(&readings, offset_from_minutes(330), &mut rng, NOW);
    assert_eq!(prediction.hourly.len(), 24);
    assert_eq!(prediction.observed_hours, 2);
    assert!(prediction.hourly.iter().all(|v| v.is_finite()));
}

#[test]
fn empty_inputs_are_degenerate_not_nan() {
    let offset = offset_from_minutes(330);
    let analysis = analyze_pattern(&[], NOW, offset);
    assert!(analysis.mean_decibel.is_finite() && analysis.variance.is_finite());
    assert_eq!(health_impact(&[], NOW).average_exposure, 0.0);
    assert_eq!(ReadingStats::from_readings(&[]).count, 0);

    let mut rng = StdRng::seed_from_u64(0);
    let prediction = predict_next_day(&[], offset, &mut rng, NOW);
    assert!(prediction.hourly.iter().all(|v| *v == 0.0));
}

#[test]
fn generated_local_set_analyzes_cleanly() {
    let criteria = FilterCriteria::decibel_range(0.0, 150.0).around(centers()[0], Some(5.0));
    let mut g = generator(21);
    let readings = get_readings(&criteria, &mut g, NOW);
    assert!(!readings.is_empty());

    let offset = g.offset();
    let analysis = analyze_pattern(&readings, NOW, offset);
    assert_eq!(analysis.sample_count, readings.len());
    assert!(analysis.variance >= 0.0);

    let prediction = predict_next_day(&readings, offset, g.rng_mut(), NOW);
    assert_eq!(prediction.observed_hours, 24);
}
