//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Unknown keys are found by walking the raw `toml::Value` tree before serde
//! sees it. They only ever warn; range errors are what reject a file.

use std::collections::HashSet;

use super::NoiseConfig;
use crate::geo::{is_within_region, REFERENCE_REGION};

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `NoiseConfig`.
///
/// Kept by hand in step with noise_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        "generator",
        "generator.utc_offset_minutes",
        "generator.seed",
        "query",
        "query.local_radius_km",
        "query.nearby_radius_km",
        "query.min_decibel",
        "query.max_decibel",
        "refresh",
        "refresh.local_interval_secs",
        "refresh.nearby_interval_secs",
        "refresh.geolocation_timeout_secs",
        "location",
        "location.latitude",
        "location.longitude",
        "location.accuracy_m",
        "geocoding",
        "geocoding.enabled",
        "geocoding.endpoint",
        "geocoding.user_agent",
        "geocoding.timeout_secs",
        "server",
        "server.addr",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Collect all dotted key paths of a `toml::Value` tree.
///
/// `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Closest known key within edit distance 3. Ties go to the
/// lexicographically smaller key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for every key in `raw_toml` that `NoiseConfig` does not know.
///
/// Unparseable input yields no warnings; serde reports it afterwards.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Check value ranges on a parsed config.
///
/// Returns (errors, warnings). Errors are values the engine cannot run
/// with; warnings are legal but probably unintended.
pub fn validate_ranges(config: &NoiseConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // chrono offsets must stay strictly inside one day
    let offset = config.generator.utc_offset_minutes;
    if offset.abs() >= 24 * 60 {
        errors.push(format!(
            "generator.utc_offset_minutes = {offset} must be within +/-1439"
        ));
    }

    let q = &config.query;
    for (name, value) in [
        ("query.local_radius_km", q.local_radius_km),
        ("query.nearby_radius_km", q.nearby_radius_km),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("{name} = {value} must be a non-negative distance"));
        }
    }
    if q.min_decibel > q.max_decibel {
        errors.push(format!(
            "query.min_decibel ({:.1}) must be <= query.max_decibel ({:.1})",
            q.min_decibel, q.max_decibel
        ));
    }
    if q.nearby_radius_km < q.local_radius_km {
        warnings.push(ValidationWarning {
            field: "query.nearby_radius_km".to_string(),
            message: format!(
                "nearby_radius_km = {:.1} is smaller than local_radius_km = {:.1}",
                q.nearby_radius_km, q.local_radius_km
            ),
            suggestion: None,
        });
    }

    let r = &config.refresh;
    for (name, value) in [
        ("refresh.local_interval_secs", r.local_interval_secs),
        ("refresh.nearby_interval_secs", r.nearby_interval_secs),
        ("refresh.geolocation_timeout_secs", r.geolocation_timeout_secs),
        ("geocoding.timeout_secs", config.geocoding.timeout_secs),
    ] {
        if value == 0 {
            errors.push(format!("{name} must be > 0"));
        }
    }

    let loc = &config.location;
    if !(-90.0..=90.0).contains(&loc.latitude) {
        errors.push(format!("location.latitude = {} is outside -90..90", loc.latitude));
    }
    if !(-180.0..=180.0).contains(&loc.longitude) {
        errors.push(format!("location.longitude = {} is outside -180..180", loc.longitude));
    }
    if errors.is_empty() && !is_within_region(loc.latitude, loc.longitude, &REFERENCE_REGION) {
        warnings.push(ValidationWarning {
            field: "location".to_string(),
            message: format!(
                "fallback location ({:.4}, {:.4}) is outside the covered region; \
                 nearby areas will be far from any city",
                loc.latitude, loc.longitude
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("radius", "radius"), 0);
        assert_eq!(levenshtein("raduis", "radius"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [query]
            local_radius_km = 5.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"query".to_string()));
        assert!(keys.contains(&"query.local_radius_km".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys("[query]\nlocal_raduis_km = 3.0\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "query.local_raduis_km");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("query.local_radius_km"));
        assert!(warnings[0].to_string().contains("did you mean"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[generator]
seed = 1
utc_offset_minutes = 0

[refresh]
local_interval_secs = 30

[geocoding]
enabled = false
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_garbage_key_has_no_suggestion() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_unparseable_toml_yields_no_warnings() {
        assert!(validate_unknown_keys("[[[").is_empty());
    }

    #[test]
    fn test_defaults_clean() {
        let (errors, warnings) = validate_ranges(&NoiseConfig::default());
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_offset_out_of_range() {
        let mut config = NoiseConfig::default();
        config.generator.utc_offset_minutes = 1440;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("utc_offset_minutes")));
    }

    #[test]
    fn test_negative_radius_is_error() {
        let mut config = NoiseConfig::default();
        config.query.local_radius_km = -1.0;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("local_radius_km")));
    }

    #[test]
    fn test_location_outside_region_warns() {
        let mut config = NoiseConfig::default();
        config.location.latitude = 51.5;
        config.location.longitude = -0.12;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "location"));
    }

    #[test]
    fn test_swapped_radii_warn() {
        let mut config = NoiseConfig::default();
        config.query.nearby_radius_km = 1.0;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "query.nearby_radius_km"));
    }
}
