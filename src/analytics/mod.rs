//! Derived-metrics engine
//!
//! Pure functions that summarise a reading set:
//! - `pattern`: variance-based classification with a time-of-day insight
//! - `health`: exposure tiering with fixed recommendations
//! - `prediction`: hour-bucketed next-day forecast with jitter
//! - `severity`: per-reading severity tiers and meter labels
//! - `stats`: average / max / min panel values
//!
//! Empty reading sets never produce NaN: means default to zero.

mod health;
mod pattern;
mod prediction;
pub mod severity;
mod stats;

pub use health::{health_impact, health_impact_for_mean, recommendations_for, summary_for};
pub use pattern::{analyze_pattern, classify_variance, time_of_day_clause};
pub use prediction::{predict_next_day, PREDICTION_JITTER_DB};
pub use severity::{MeterLevel, Severity};
pub use stats::ReadingStats;

use statrs::statistics::Statistics;

use crate::types::Reading;

/// Mean decibel of `readings`, or 0.0 for an empty set.
pub fn mean_decibel(readings: &[Reading]) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    readings.iter().map(|r| r.decibel).mean()
}

/// Population variance of decibel values, or 0.0 for an empty set.
pub fn decibel_variance(readings: &[Reading]) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    readings.iter().map(|r| r.decibel).population_variance()
}


#[cfg(test)]
mod tests {
    use super::test_support::readings_with;
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let readings = readings_with(&[60.0, 70.0, 80.0]);
        assert!((mean_decibel(&readings) - 70.0).abs() < 1e-9);
        // population variance: (100 + 0 + 100) / 3
        assert!((decibel_variance(&readings) - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_set_is_zero_not_nan() {
        assert_eq!(mean_decibel(&[]), 0.0);
        assert_eq!(decibel_variance(&[]), 0.0);
    }

    #[test]
    fn test_single_reading_has_zero_variance() {
        let readings = readings_with(&[73.0]);
        assert_eq!(decibel_variance(&readings), 0.0);
    }
}
