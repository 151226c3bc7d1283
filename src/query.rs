//! Query/filter engine over freshly generated readings.

use rand::Rng;

use crate::geo::distance_km;
use crate::synthetic::ReadingGenerator;
use crate::types::{FilterCriteria, NewReading, Reading};

/// Length of ids assigned to submitted readings.
pub const SUBMITTED_ID_LEN: usize = 9;

/// Base-36 digits used for submitted ids.
const ID_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Regenerate readings and narrow them by `criteria`.
///
/// The major-city batch is always produced. With a center the nearby-area
/// batch is appended, and a radius then drops anything farther than
/// `radius_km` from the center. A zero or NaN radius counts as no radius.
/// The decibel range is inclusive on both
/// ends; an inverted range simply matches nothing. Output is ordered most
/// recent first, keeping generation order among equal timestamps.
pub fn get_readings<R: Rng>(
    criteria: &FilterCriteria,
    generator: &mut ReadingGenerator<R>,
    now: i64,
) -> Vec<Reading> {
    let mut readings = generator.major_city_readings(now);

    if let Some(center) = criteria.center {
        readings.extend(generator.nearby_area_readings(center.point(), now));

        if let Some(radius_km) = criteria.radius_km.filter(|r| *r != 0.0 && !r.is_nan()) {
            readings.retain(|r| {
                distance_km(center.latitude, center.longitude, r.latitude, r.longitude)
                    <= radius_km
            });
        }
    }

    readings.retain(|r| r.decibel >= criteria.min_decibel && r.decibel <= criteria.max_decibel);

    // stable: equal timestamps keep generation order
    readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    tracing::debug!(
        count = readings.len(),
        time_range = %criteria.time_range,
        min_db = criteria.min_decibel,
        max_db = criteria.max_decibel,
        radius_km = ?criteria.radius_km,
        "Reading query complete"
    );

    readings
}

/// Assign a fresh id to a caller-provided reading.
///
/// Pure construction: no validation and no storage. The caller owns the
/// returned reading.
pub fn submit_reading<R: Rng + ?Sized>(reading: NewReading, rng: &mut R) -> Reading {
    let id: String = (0..SUBMITTED_ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    reading.with_id(id)
}
