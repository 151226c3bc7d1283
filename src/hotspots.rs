//! Greedy single-pass hotspot clustering.
//!
//! Readings are visited in input order. The first unassigned reading seeds a
//! group made of itself and every other unassigned reading within
//! [`CLUSTER_RADIUS_KM`] of it. Membership is a neighbourhood of the seed,
//! not a transitive closure: a reading near a member but far from the seed
//! stays out and may seed its own hotspot later.

use std::collections::HashSet;

use crate::geo::distance_km;
use crate::types::{Hotspot, Reading};

/// Maximum seed-to-member distance (km).
pub const CLUSTER_RADIUS_KM: f64 = 2.0;

/// Display radius attached to every hotspot (metres).
pub const HOTSPOT_DISPLAY_RADIUS_M: f64 = 500.0;

/// Partition `readings` into hotspots.
///
/// Output order follows the seeds' input order. Readings are tracked by id,
/// so a repeated id after its first assignment is skipped.
pub fn build_hotspots(readings: &[Reading]) -> Vec<Hotspot> {
    let mut hotspots = Vec::new();
    let mut assigned: HashSet<&str> = HashSet::with_capacity(readings.len());

    for seed in readings {
        if assigned.contains(seed.id.as_str()) {
            continue;
        }

        let mut members: Vec<&Reading> = vec![seed];
        members.extend(readings.iter().filter(|r| {
            r.id != seed.id
                && !assigned.contains(r.id.as_str())
                && distance_km(seed.latitude, seed.longitude, r.latitude, r.longitude)
                    <= CLUSTER_RADIUS_KM
        }));

        for m in &members {
            assigned.insert(m.id.as_str());
        }

        hotspots.push(aggregate(hotspots.len() + 1, &members));
    }

    tracing::debug!(
        readings = readings.len(),
        hotspots = hotspots.len(),
        "Hotspot clustering complete"
    );

    hotspots
}

/// Build one hotspot from a non-empty member list (seed first).
fn aggregate(ordinal: usize, members: &[&Reading]) -> Hotspot {
    let n = members.len() as f64;
    let (lat_sum, lng_sum, db_sum) = members.iter().fold((0.0, 0.0, 0.0), |acc, r| {
        (acc.0 + r.latitude, acc.1 + r.longitude, acc.2 + r.decibel)
    });

    Hotspot {
        id: format!("hotspot-{ordinal}"),
        latitude: lat_sum / n,
        longitude: lng_sum / n,
        average_decibel: db_sum / n,
        reading_count: members.len(),
        radius: HOTSPOT_DISPLAY_RADIUS_M,
        city_name: members.first().and_then(|r| r.city_name.clone()),
        member_ids: members.iter().map(|r| r.id.clone()).collect(),
    }
}
