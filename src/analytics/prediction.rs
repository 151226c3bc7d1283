//! Next-day noise prediction.
//!
//! Not a trained model: readings are bucketed by hour of day, each bucket is
//! averaged (empty buckets take the overall mean), then a uniform jitter is
//! added and the result rounded.

use chrono::FixedOffset;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::mean_decibel;
use crate::clock::hour_of_day;
use crate::types::{NoisePrediction, Reading};

/// Half-width of the per-hour jitter (dB).
pub const PREDICTION_JITTER_DB: f64 = 2.5;

const HOURS_PER_DAY: usize = 24;

/// Forecast one decibel value per hour of the next day.
///
/// Always returns 24 finite values. An empty reading set yields all zeros
/// with no jitter applied.
pub fn predict_next_day<R: Rng + ?Sized>(
    readings: &[Reading],
    offset: FixedOffset,
    rng: &mut R,
    now: i64,
) -> NoisePrediction {
    if readings.is_empty() {
        return NoisePrediction {
            hourly: vec![0.0; HOURS_PER_DAY],
            observed_hours: 0,
            timestamp: now,
        };
    }

    let mut sums = [0.0_f64; HOURS_PER_DAY];
    let mut counts = [0_usize; HOURS_PER_DAY];
    for r in readings {
        let hour = hour_of_day(r.timestamp, offset) as usize;
        sums[hour] += r.decibel;
        counts[hour] += 1;
    }

    let overall = mean_decibel(readings);
    let jitter = Uniform::new(-PREDICTION_JITTER_DB, PREDICTION_JITTER_DB);

    let hourly = sums
        .iter()
        .zip(counts.iter())
        .map(|(&sum, &count)| {
            let avg = if count > 0 { sum / count as f64 } else { overall };
            (avg + jitter.sample(rng)).round()
        })
        .collect();

    NoisePrediction {
        hourly,
        observed_hours: counts.iter().filter(|&&c| c > 0).count(),
        timestamp: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::reading_at;
    use crate::clock::{utc_offset, HOUR_MS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // 2024-01-01T00:00:00Z
    const MIDNIGHT: i64 = 1_704_067_200_000;

    #[test]
    fn test_two_hour_input_fills_all_buckets() {
        let readings = vec![
            reading_at(0, 80.0, MIDNIGHT + 8 * HOUR_MS),
            reading_at(1, 84.0, MIDNIGHT + 8 * HOUR_MS + 60_000),
            reading_at(2, 60.0, MIDNIGHT + 2 * HOUR_MS),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let prediction = predict_next_day(&readings, utc_offset(), &mut rng, MIDNIGHT);

        assert_eq!(prediction.hourly.len(), 24);
        assert_eq!(prediction.observed_hours, 2);
        assert!(prediction.hourly.iter().all(|v| v.is_finite()));

        // hour 8 averages 82, hour 2 is 60, the rest fall back to the mean (~74.67)
        assert!((prediction.hourly[8] - 82.0).abs() <= 3.0);
        assert!((prediction.hourly[2] - 60.0).abs() <= 3.0);
        for (hour, v) in prediction.hourly.iter().enumerate() {
            if hour != 8 && hour != 2 {
                assert!((v - 74.67).abs() <= 3.5, "hour {hour}: {v}");
            }
        }
    }

    #[test]
    fn test_values_are_rounded() {
        let readings = vec![reading_at(0, 71.3, MIDNIGHT)];
        let mut rng = StdRng::seed_from_u64(8);
        let prediction = predict_next_day(&readings, utc_offset(), &mut rng, MIDNIGHT);
        assert!(prediction.hourly.iter().all(|v| *v == v.round()));
    }

    #[test]
    fn test_empty_is_zeroes() {
        let mut rng = StdRng::seed_from_u64(1);
        let prediction = predict_next_day(&[], utc_offset(), &mut rng, MIDNIGHT);
        assert_eq!(prediction.hourly, vec![0.0; 24]);
        assert_eq!(prediction.observed_hours, 0);
    }

    #[test]
    fn test_offset_shifts_buckets() {
        // 02:00Z is 07:30 at UTC+05:30
        let readings = vec![reading_at(0, 90.0, MIDNIGHT + 2 * HOUR_MS)];
        let mut rng = StdRng::seed_from_u64(4);
        let ist = crate::clock::offset_from_minutes(330);
        let prediction = predict_next_day(&readings, ist, &mut rng, MIDNIGHT);
        assert_eq!(prediction.observed_hours, 1);
        assert!((prediction.hourly[7] - 90.0).abs() <= 3.0);
    }
}
