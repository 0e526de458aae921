//! Alert classification.
//!
//! Phrases found in the narrative win over the air quality index. Keep the
//! phrase lists exact; the prompt asks the model to use these wordings.

use serde::{Deserialize, Serialize};

/// Substrings (lowercase) that mark a high-risk narrative
pub const HIGH_PHRASES: &[&str] = &["high risk", "risk level: high"];
/// Substrings (lowercase) that mark a moderate-risk narrative
pub const MODERATE_PHRASES: &[&str] = &["moderate risk", "risk level: moderate"];

/// Index assumed when no air quality reading is available
const DEFAULT_AQI: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    Low,
    Moderate,
    High,
}

impl AlertLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Badge color name: red / yellow / green
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Moderate => "yellow",
            Self::High => "red",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reduce an air quality index and an optional narrative to one alert level.
pub fn classify(air_quality_index: Option<u8>, narrative: Option<&str>) -> AlertLevel {
    if let Some(text) = narrative {
        let text = text.to_lowercase();
        if HIGH_PHRASES.iter().any(|p| text.contains(p)) {
            return AlertLevel::High;
        }
        if MODERATE_PHRASES.iter().any(|p| text.contains(p)) {
            return AlertLevel::Moderate;
        }
    }

    match air_quality_index.unwrap_or(DEFAULT_AQI) {
        aqi if aqi >= 4 => AlertLevel::High,
        aqi if aqi >= 2 => AlertLevel::Moderate,
        _ => AlertLevel::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aqi_thresholds_without_narrative() {
        assert_eq!(classify(Some(0), None), AlertLevel::Low);
        assert_eq!(classify(Some(1), None), AlertLevel::Low);
        assert_eq!(classify(Some(2), None), AlertLevel::Moderate);
        assert_eq!(classify(Some(3), None), AlertLevel::Moderate);
        assert_eq!(classify(Some(4), None), AlertLevel::High);
        assert_eq!(classify(Some(5), None), AlertLevel::High);
    }

    #[test]
    fn test_missing_everything_is_low() {
        assert_eq!(classify(None, None), AlertLevel::Low);
        assert_eq!(classify(None, Some("")), AlertLevel::Low);
    }

    #[test]
    fn test_high_phrase_overrides_good_air() {
        assert_eq!(classify(Some(1), Some("Overall RISK LEVEL: HIGH")), AlertLevel::High);
        assert_eq!(classify(None, Some("Dengue: High Risk")), AlertLevel::High);
    }

    #[test]
    fn test_moderate_phrase_overrides_default_low() {
        assert_eq!(classify(Some(1), Some("Risk Level: Moderate")), AlertLevel::Moderate);
    }

    #[test]
    fn test_moderate_phrase_overrides_bad_air() {
        // Narrative judgment wins even when the index alone would say High
        assert_eq!(classify(Some(5), Some("moderate risk of influenza")), AlertLevel::Moderate);
    }

    #[test]
    fn test_high_beats_moderate_in_same_text() {
        let text = "Flu: moderate risk. Dengue: high risk.";
        assert_eq!(classify(Some(1), Some(text)), AlertLevel::High);
    }

    #[test]
    fn test_neutral_narrative_falls_back_to_index() {
        let text = "Risk Level: Low for all listed diseases.";
        assert_eq!(classify(Some(4), Some(text)), AlertLevel::High);
        assert_eq!(classify(Some(3), Some(text)), AlertLevel::Moderate);
        assert_eq!(classify(Some(1), Some(text)), AlertLevel::Low);
    }

    #[test]
    fn test_phrases_must_match_literally() {
        // "highly risky" is not one of the phrases
        assert_eq!(classify(Some(1), Some("a highly risky season")), AlertLevel::Low);
        assert_eq!(classify(Some(1), Some("risk level:high")), AlertLevel::Low);
    }

    #[test]
    fn test_ordering_and_labels() {
        assert!(AlertLevel::High > AlertLevel::Moderate);
        assert!(AlertLevel::Moderate > AlertLevel::Low);
        assert_eq!(AlertLevel::High.color(), "red");
        assert_eq!(AlertLevel::Low.to_string(), "Low");
    }
}
