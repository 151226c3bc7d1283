//! Synthetic Reading Generator
//!
//! Produces a 24-hour decibel history for two location catalogs:
//! - Major cities at fixed coordinates
//! - Nearby areas offset from a caller-supplied center
//!
//! Each (location, hour) pair yields one reading whose level is the
//! location's base decibel shifted by a time-of-day band. The random source
//! is owned by the generator so callers can pin output with a seed.

mod catalog;

pub use catalog::{AreaEntry, CityEntry, MAJOR_CITIES, NEARBY_AREAS};

use chrono::FixedOffset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{hour_of_day, HOUR_MS};
use crate::types::{GeoPoint, Reading, DEVICE_STATIC};

/// Hours of history generated per location.
pub const HISTORY_HOURS: i64 = 24;

/// Id prefix for major-city readings.
pub const CITY_ID_PREFIX: &str = "city";

/// Id prefix for nearby-area readings.
pub const NEARBY_ID_PREFIX: &str = "nearby";

/// Time-of-day band used to shift a base decibel level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourBand {
    /// 07:00-10:59
    MorningRush,
    /// 17:00-20:59
    EveningRush,
    /// 23:00-05:59
    Night,
    /// Everything else
    Regular,
}

impl HourBand {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            7..=10 => HourBand::MorningRush,
            17..=20 => HourBand::EveningRush,
            23 | 0..=5 => HourBand::Night,
            _ => HourBand::Regular,
        }
    }
}

/// Shift `base` by a random draw from the band for `hour`.
///
/// - morning rush: `+U(0, 10)`
/// - evening rush: `+U(0, 8)`
/// - night: `-U(0, 15)`
/// - regular: `+U(-2.5, 2.5)`
pub fn time_of_day_adjustment<R: Rng + ?Sized>(base: f64, hour: u32, rng: &mut R) -> f64 {
    match HourBand::from_hour(hour) {
        HourBand::MorningRush => base + rng.gen_range(0.0..10.0),
        HourBand::EveningRush => base + rng.gen_range(0.0..8.0),
        HourBand::Night => base - rng.gen_range(0.0..15.0),
        HourBand::Regular => base + rng.gen_range(-2.5..2.5),
    }
}

/// Generator for synthetic reading batches.
///
/// Every call draws fresh random values; batches are never cached.
#[derive(Debug, Clone)]
pub struct ReadingGenerator<R = StdRng> {
    rng: R,
    offset: FixedOffset,
}

impl ReadingGenerator<StdRng> {
    /// Create a generator, seeded when `seed` is given.
    pub fn new(offset: FixedOffset, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng, offset }
    }
}

impl<R: Rng> ReadingGenerator<R> {
    /// Create a generator around an existing random source.
    pub fn with_rng(rng: R, offset: FixedOffset) -> Self {
        Self { rng, offset }
    }

    /// Offset used to derive hour-of-day from timestamps.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Borrow the random source (shared with id assignment and prediction jitter).
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// One reading per major city per hour, newest hour first within each city.
    pub fn major_city_readings(&mut self, now: i64) -> Vec<Reading> {
        let sites: Vec<_> = MAJOR_CITIES
            .iter()
            .map(|c| (c.name, c.location, c.base_decibel))
            .collect();
        let readings = self.generate_batch(CITY_ID_PREFIX, &sites, now);
        tracing::debug!(count = readings.len(), "Generated major-city readings");
        readings
    }

    /// One reading per nearby area per hour, positioned relative to `center`.
    pub fn nearby_area_readings(&mut self, center: GeoPoint, now: i64) -> Vec<Reading> {
        let sites: Vec<_> = NEARBY_AREAS
            .iter()
            .map(|a| (a.name, center.offset(a.offset), a.base_decibel))
            .collect();
        let readings = self.generate_batch(NEARBY_ID_PREFIX, &sites, now);
        tracing::debug!(
            count = readings.len(),
            center_lat = center.lat,
            center_lng = center.lng,
            "Generated nearby-area readings"
        );
        readings
    }

    fn generate_batch(
        &mut self,
        prefix: &str,
        sites: &[(&'static str, GeoPoint, f64)],
        now: i64,
    ) -> Vec<Reading> {
        let mut readings = Vec::with_capacity(sites.len() * HISTORY_HOURS as usize);

        for (index, &(name, point, base_decibel)) in sites.iter().enumerate() {
            for hour in 0..HISTORY_HOURS {
                let timestamp = now - hour * HOUR_MS;
                let local_hour = hour_of_day(timestamp, self.offset);
                let level = time_of_day_adjustment(base_decibel, local_hour, &mut self.rng);

                readings.push(Reading {
                    id: format!("{prefix}-{index}-{hour}"),
                    latitude: point.lat,
                    longitude: point.lng,
                    decibel: level.round(),
                    timestamp,
                    device_type: DEVICE_STATIC.to_string(),
                    user_id: None,
                    city_name: Some(name.to_string()),
                });
            }
        }

        readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::utc_offset;
    use std::collections::HashSet;

    // 2024-01-01T12:00:00Z
    const NOW: i64 = 1_704_110_400_000;

    fn generator(seed: u64) -> ReadingGenerator {
        ReadingGenerator::new(utc_offset(), Some(seed))
    }

    #[test]
    fn test_hour_bands() {
        assert_eq!(HourBand::from_hour(6), HourBand::Regular);
        assert_eq!(HourBand::from_hour(7), HourBand::MorningRush);
        assert_eq!(HourBand::from_hour(10), HourBand::MorningRush);
        assert_eq!(HourBand::from_hour(11), HourBand::Regular);
        assert_eq!(HourBand::from_hour(17), HourBand::EveningRush);
        assert_eq!(HourBand::from_hour(20), HourBand::EveningRush);
        assert_eq!(HourBand::from_hour(22), HourBand::Regular);
        assert_eq!(HourBand::from_hour(23), HourBand::Night);
        assert_eq!(HourBand::from_hour(0), HourBand::Night);
        assert_eq!(HourBand::from_hour(5), HourBand::Night);
    }

    #[test]
    fn test_adjustment_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let m = time_of_day_adjustment(80.0, 8, &mut rng);
            assert!((80.0..90.0).contains(&m));
            let e = time_of_day_adjustment(80.0, 18, &mut rng);
            assert!((80.0..88.0).contains(&e));
            let n = time_of_day_adjustment(80.0, 2, &mut rng);
            assert!(n > 65.0 && n <= 80.0);
            let r = time_of_day_adjustment(80.0, 14, &mut rng);
            assert!((77.5..82.5).contains(&r));
        }
    }

    #[test]
    fn test_major_city_batch_shape() {
        let readings = generator(1).major_city_readings(NOW);
        assert_eq!(readings.len(), MAJOR_CITIES.len() * 24);

        let ids: HashSet<_> = readings.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), readings.len(), "ids must be unique within a batch");

        assert_eq!(readings[0].id, "city-0-0");
        assert_eq!(readings[0].timestamp, NOW);
        assert_eq!(readings[23].id, "city-0-23");
        assert_eq!(readings[23].timestamp, NOW - 23 * HOUR_MS);
        assert_eq!(readings[24].city_name.as_deref(), Some("Mumbai"));
        assert!(readings.iter().all(|r| r.device_type == DEVICE_STATIC));
    }

    #[test]
    fn test_decibels_are_integral_and_near_base() {
        let readings = generator(2).major_city_readings(NOW);
        for r in &readings {
            assert_eq!(r.decibel, r.decibel.round());
            let base = MAJOR_CITIES
                .iter()
                .find(|c| Some(c.name) == r.city_name.as_deref())
                .map(|c| c.base_decibel)
                .unwrap_or_default();
            assert!(r.decibel >= base - 15.0 && r.decibel <= base + 10.0);
        }
    }

    #[test]
    fn test_nearby_areas_follow_center() {
        let center = GeoPoint::new(12.9, 80.1);
        let readings = generator(3).nearby_area_readings(center, NOW);
        assert_eq!(readings.len(), NEARBY_AREAS.len() * 24);

        let tambaram = &readings[0];
        assert_eq!(tambaram.id, "nearby-0-0");
        assert!((tambaram.latitude - 12.85).abs() < 1e-9);
        assert!((tambaram.longitude - 80.12).abs() < 1e-9);
        assert_eq!(tambaram.city_name.as_deref(), Some("Tambaram"));
    }

    #[test]
    fn test_same_seed_same_batch() {
        let a = generator(42).major_city_readings(NOW);
        let b = generator(42).major_city_readings(NOW);
        assert_eq!(a, b);
    }

    #[test]
    fn test_night_hours_are_quieter_than_base() {
        // 12:00Z minus 10h = 02:00Z, a night hour in UTC
        let readings = generator(9).major_city_readings(NOW);
        let delhi_night = readings.iter().find(|r| r.id == "city-0-10").map(|r| r.decibel);
        assert!(delhi_night.is_some_and(|db| db <= 85.0));
    }
}
