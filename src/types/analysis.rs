//! Analytics outputs: pattern classification, health impact, prediction

use serde::{Deserialize, Serialize};

/// Variance-based classification of a reading set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternType {
    Consistent,
    Fluctuating,
    Erratic,
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternType::Consistent => write!(f, "Consistent"),
            PatternType::Fluctuating => write!(f, "Fluctuating"),
            PatternType::Erratic => write!(f, "Erratic"),
        }
    }
}

/// Result of pattern classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseAnalysis {
    pub pattern_type: PatternType,
    pub insight: String,
    /// Fixed confidence score per pattern (percent)
    pub confidence: u8,
    pub mean_decibel: f64,
    pub variance: f64,
    pub sample_count: usize,
    /// Analysis time, milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Long-term exposure risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Health-impact summary for a reading set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthImpact {
    pub summary: String,
    /// Ordered, most important first
    pub recommendations: Vec<String>,
    /// Mean decibel of the set
    pub average_exposure: f64,
    pub risk_level: RiskLevel,
    pub timestamp: i64,
}

/// Naive next-day forecast: one rounded decibel value per hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoisePrediction {
    /// Index = hour of day (0-23)
    pub hourly: Vec<f64>,
    /// Hours that had at least one sample
    pub observed_hours: usize,
    pub timestamp: i64,
}
