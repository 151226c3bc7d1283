//! Severity tiers and meter labels for individual decibel values.

use serde::{Deserialize, Serialize};

/// Map/legend severity of a single level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Dangerous,
}

impl Severity {
    pub fn from_decibel(decibel: f64) -> Self {
        match decibel {
            d if d < 70.0 => Severity::Low,
            d if d < 85.0 => Severity::Moderate,
            d if d < 100.0 => Severity::High,
            _ => Severity::Dangerous,
        }
    }

    /// Hex colour used by the map legend.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "#22c55e",
            Severity::Moderate => "#f59e0b",
            Severity::High => "#ef4444",
            Severity::Dangerous => "#7f1d1d",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::High => write!(f, "high"),
            Severity::Dangerous => write!(f, "dangerous"),
        }
    }
}

/// Label shown by the noise meter for the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterLevel {
    Quiet,
    Moderate,
    Loud,
    VeryLoud,
    ExtremelyLoud,
}

impl MeterLevel {
    pub fn from_decibel(decibel: f64) -> Self {
        match decibel {
            d if d < 65.0 => MeterLevel::Quiet,
            d if d < 75.0 => MeterLevel::Moderate,
            d if d < 85.0 => MeterLevel::Loud,
            d if d < 95.0 => MeterLevel::VeryLoud,
            _ => MeterLevel::ExtremelyLoud,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeterLevel::Quiet => "Quiet",
            MeterLevel::Moderate => "Moderate",
            MeterLevel::Loud => "Loud",
            MeterLevel::VeryLoud => "Very Loud",
            MeterLevel::ExtremelyLoud => "Extremely Loud",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(Severity::from_decibel(69.9), Severity::Low);
        assert_eq!(Severity::from_decibel(70.0), Severity::Moderate);
        assert_eq!(Severity::from_decibel(85.0), Severity::High);
        assert_eq!(Severity::from_decibel(99.9), Severity::High);
        assert_eq!(Severity::from_decibel(100.0), Severity::Dangerous);
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Low.color(), "#22c55e");
        assert_eq!(Severity::Dangerous.color(), "#7f1d1d");
    }

    #[test]
    fn test_meter_levels() {
        assert_eq!(MeterLevel::from_decibel(50.0).label(), "Quiet");
        assert_eq!(MeterLevel::from_decibel(65.0).label(), "Moderate");
        assert_eq!(MeterLevel::from_decibel(80.0).label(), "Loud");
        assert_eq!(MeterLevel::from_decibel(94.0).label(), "Very Loud");
        assert_eq!(MeterLevel::from_decibel(120.0).label(), "Extremely Loud");
    }
}
