//! Pattern classification.

use chrono::FixedOffset;

use super::{decibel_variance, mean_decibel};
use crate::clock::hour_of_day;
use crate::types::{NoiseAnalysis, PatternType, Reading};

/// Variance below which levels are considered stable.
const CONSISTENT_VARIANCE: f64 = 5.0;
/// Variance below which levels are considered typical urban fluctuation.
const FLUCTUATING_VARIANCE: f64 = 15.0;

/// Classify a variance into a pattern, its fixed confidence and base insight.
pub fn classify_variance(variance: f64) -> (PatternType, u8, &'static str) {
    if variance < CONSISTENT_VARIANCE {
        (
            PatternType::Consistent,
            85,
            "The noise levels show a stable pattern, suggesting consistent ambient noise.",
        )
    } else if variance < FLUCTUATING_VARIANCE {
        (
            PatternType::Fluctuating,
            75,
            "Moderate variations in noise levels indicate typical urban activity patterns.",
        )
    } else {
        (
            PatternType::Erratic,
            65,
            "High variations in noise levels suggest irregular noise sources requiring attention.",
        )
    }
}

/// Insight suffix for the hour at which the analysis runs.
pub fn time_of_day_clause(hour: u32) -> Option<&'static str> {
    match hour {
        6..=9 => Some(" Morning rush hour patterns detected."),
        17..=19 => Some(" Evening peak activity observed."),
        h if h >= 22 || h <= 5 => Some(" Night-time noise levels analyzed."),
        _ => None,
    }
}

/// Classify `readings` by decibel variance.
///
/// `now` is the analysis time; its hour in `offset` selects the insight
/// suffix. An empty set classifies as `Consistent` with zero mean.
pub fn analyze_pattern(readings: &[Reading], now: i64, offset: FixedOffset) -> NoiseAnalysis {
    let mean = mean_decibel(readings);
    let variance = decibel_variance(readings);
    let (pattern_type, confidence, base) = classify_variance(variance);

    let mut insight = base.to_string();
    if let Some(clause) = time_of_day_clause(hour_of_day(now, offset)) {
        insight.push_str(clause);
    }

    NoiseAnalysis {
        pattern_type,
        insight,
        confidence,
        mean_decibel: mean,
        variance,
        sample_count: readings.len(),
        timestamp: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::readings_with;
    use crate::clock::{utc_offset, HOUR_MS};

    // 2024-01-01T00:00:00Z
    const MIDNIGHT: i64 = 1_704_067_200_000;

    #[test]
    fn test_variance_thresholds() {
        assert_eq!(classify_variance(0.0).0, PatternType::Consistent);
        assert_eq!(classify_variance(4.99).0, PatternType::Consistent);
        assert_eq!(classify_variance(5.0).0, PatternType::Fluctuating);
        assert_eq!(classify_variance(14.99).0, PatternType::Fluctuating);
        assert_eq!(classify_variance(15.0).0, PatternType::Erratic);
        assert_eq!(classify_variance(15.0).1, 65);
    }

    #[test]
    fn test_consistent_readings() {
        let readings = readings_with(&[70.0, 71.0, 70.0, 69.0]);
        let analysis = analyze_pattern(&readings, MIDNIGHT + 12 * HOUR_MS, utc_offset());
        assert_eq!(analysis.pattern_type, PatternType::Consistent);
        assert_eq!(analysis.confidence, 85);
        assert_eq!(analysis.sample_count, 4);
        assert!(analysis.insight.starts_with("The noise levels show a stable pattern"));
        // noon has no time-of-day clause
        assert!(analysis.insight.ends_with("consistent ambient noise."));
    }

    #[test]
    fn test_erratic_readings_at_night() {
        let readings = readings_with(&[50.0, 90.0, 55.0, 95.0]);
        let analysis = analyze_pattern(&readings, MIDNIGHT + 2 * HOUR_MS, utc_offset());
        assert_eq!(analysis.pattern_type, PatternType::Erratic);
        assert!(analysis.insight.ends_with("Night-time noise levels analyzed."));
    }

    #[test]
    fn test_time_clauses() {
        assert!(time_of_day_clause(6).is_some_and(|c| c.contains("Morning")));
        assert!(time_of_day_clause(9).is_some_and(|c| c.contains("Morning")));
        assert!(time_of_day_clause(10).is_none());
        assert!(time_of_day_clause(17).is_some_and(|c| c.contains("Evening")));
        assert!(time_of_day_clause(20).is_none());
        assert!(time_of_day_clause(22).is_some_and(|c| c.contains("Night")));
        assert!(time_of_day_clause(5).is_some_and(|c| c.contains("Night")));
    }

    #[test]
    fn test_empty_is_degenerate_consistent() {
        let analysis = analyze_pattern(&[], MIDNIGHT + 12 * HOUR_MS, utc_offset());
        assert_eq!(analysis.pattern_type, PatternType::Consistent);
        assert_eq!(analysis.mean_decibel, 0.0);
        assert_eq!(analysis.sample_count, 0);
    }
}
