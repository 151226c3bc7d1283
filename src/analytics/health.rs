//! Health-impact scoring.
//!
//! Exposure tiers (mean decibel over the set):
//! - Low:      < 70 dB
//! - Moderate: 70 - 85 dB
//! - High:     >= 85 dB

use super::mean_decibel;
use crate::types::{HealthImpact, Reading, RiskLevel};

const LOW_EXPOSURE_LIMIT_DB: f64 = 70.0;
const MODERATE_EXPOSURE_LIMIT_DB: f64 = 85.0;

impl RiskLevel {
    /// Tier a mean exposure level. Boundaries belong to the higher tier.
    pub fn from_mean_decibel(mean: f64) -> Self {
        if mean < LOW_EXPOSURE_LIMIT_DB {
            RiskLevel::Low
        } else if mean < MODERATE_EXPOSURE_LIMIT_DB {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

/// Summary sentence for a risk tier.
pub fn summary_for(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Current noise levels are within safe limits for long-term exposure.",
        RiskLevel::Moderate => "Moderate noise exposure detected. Some precautions recommended.",
        RiskLevel::High => "High noise levels detected. Immediate action recommended.",
    }
}

/// Ordered recommendations for a risk tier.
pub fn recommendations_for(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Low => &[
            "Continue monitoring noise levels",
            "Maintain current noise control measures",
            "Consider periodic hearing checkups",
        ],
        RiskLevel::Moderate => &[
            "Use sound-dampening materials where possible",
            "Take regular breaks from noisy areas",
            "Consider using noise-canceling headphones",
            "Schedule quiet periods during the day",
        ],
        RiskLevel::High => &[
            "Use hearing protection when in the area",
            "Limit exposure time to noisy periods",
            "Identify and address major noise sources",
            "Consult with health professionals if experiencing symptoms",
            "Consider soundproofing options",
        ],
    }
}

/// Score the health impact of a mean exposure level.
pub fn health_impact_for_mean(mean: f64, now: i64) -> HealthImpact {
    let risk_level = RiskLevel::from_mean_decibel(mean);
    HealthImpact {
        summary: summary_for(risk_level).to_string(),
        recommendations: recommendations_for(risk_level)
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
        average_exposure: mean,
        risk_level,
        timestamp: now,
    }
}

/// Score the health impact of a reading set by its mean decibel.
///
/// An empty set scores as zero exposure (`Low`).
pub fn health_impact(readings: &[Reading], now: i64) -> HealthImpact {
    health_impact_for_mean(mean_decibel(readings), now)
}
