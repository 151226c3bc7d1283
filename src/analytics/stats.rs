//! Summary statistics for the local readings panel.

use serde::{Deserialize, Serialize};

use super::mean_decibel;
use crate::types::Reading;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingStats {
    /// Rounded mean
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

impl ReadingStats {
    /// All fields are zero for an empty set.
    pub fn from_readings(readings: &[Reading]) -> Self {
        if readings.is_empty() {
            return Self::default();
        }

        let (min, max) = readings
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.decibel), hi.max(r.decibel))
            });

        Self {
            average: mean_decibel(readings).round(),
            max,
            min,
            count: readings.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::readings_with;

    #[test]
    fn test_stats() {
        let stats = ReadingStats::from_readings(&readings_with(&[61.0, 74.0, 68.0]));
        assert_eq!(stats.count, 3);
        assert_eq!(stats.max, 74.0);
        assert_eq!(stats.min, 61.0);
        assert_eq!(stats.average, 68.0);
    }

    #[test]
    fn test_empty_stats_are_zero() {
        assert_eq!(ReadingStats::from_readings(&[]), ReadingStats::default());
    }
}
