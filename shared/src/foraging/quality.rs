//! Foraging quality tiers and their thresholds

use serde::{Deserialize, Serialize};

/// Qualitative label for how well current weather favours fruiting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ForagingQuality {
    Perfect,
    Good,
    Average,
    Poor,
}

impl ForagingQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForagingQuality::Perfect => "perfect",
            ForagingQuality::Good => "good",
            ForagingQuality::Average => "average",
            ForagingQuality::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ForagingQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ForagingQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perfect" => Ok(ForagingQuality::Perfect),
            "good" => Ok(ForagingQuality::Good),
            "average" => Ok(ForagingQuality::Average),
            "poor" => Ok(ForagingQuality::Poor),
            other => Err(format!("unknown foraging quality: {}", other)),
        }
    }
}

/// One positive tier: every bound must hold for the tier to match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityTier {
    pub quality: ForagingQuality,
    /// Minimum average temperature (°C), inclusive
    pub min_temp: f64,
    /// Maximum average rainfall (mm), inclusive
    pub max_rain: f64,
    /// Minimum average relative humidity (%), inclusive
    pub min_humidity: f64,
    /// Maximum average wind speed (km/h), inclusive
    pub max_wind: f64,
}

impl QualityTier {
    pub fn matches(&self, avg_temp: f64, avg_rain: f64, avg_humidity: f64, avg_wind: f64) -> bool {
        avg_temp >= self.min_temp
            && avg_rain <= self.max_rain
            && avg_humidity >= self.min_humidity
            && avg_wind <= self.max_wind
    }
}

/// Ordered tier list. The first matching tier wins; no match means `Poor`.
///
/// Tiers overlap and leave gaps (warm, wet-enough but dry-air days fall
/// straight to `Poor`). Order is significant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityThresholds {
    pub tiers: Vec<QualityTier>,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            tiers: vec![
                QualityTier {
                    quality: ForagingQuality::Perfect,
                    min_temp: 19.0,
                    max_rain: 40.0,
                    min_humidity: 90.0,
                    max_wind: 8.0,
                },
                QualityTier {
                    quality: ForagingQuality::Good,
                    min_temp: 15.0,
                    max_rain: 20.0,
                    min_humidity: 70.0,
                    max_wind: 12.0,
                },
                QualityTier {
                    quality: ForagingQuality::Average,
                    min_temp: 12.0,
                    max_rain: 10.0,
                    min_humidity: 60.0,
                    max_wind: 15.0,
                },
            ],
        }
    }
}

impl QualityThresholds {
    /// Classify averaged conditions against the ordered tiers
    pub fn classify(
        &self,
        avg_temp: f64,
        avg_rain: f64,
        avg_humidity: f64,
        avg_wind: f64,
    ) -> ForagingQuality {
        self.tiers
            .iter()
            .find(|tier| tier.matches(avg_temp, avg_rain, avg_humidity, avg_wind))
            .map(|tier| tier.quality)
            .unwrap_or(ForagingQuality::Poor)
    }
}

/// Classify averaged conditions using the compiled-in thresholds
pub fn classify_quality(
    avg_temp: f64,
    avg_rain: f64,
    avg_humidity: f64,
    avg_wind: f64,
) -> ForagingQuality {
    QualityThresholds::default().classify(avg_temp, avg_rain, avg_humidity, avg_wind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_at_exact_thresholds() {
        assert_eq!(classify_quality(19.0, 40.0, 90.0, 8.0), ForagingQuality::Perfect);
    }

    #[test]
    fn test_just_below_perfect_temp_falls_to_good() {
        assert_eq!(classify_quality(18.999, 10.0, 95.0, 5.0), ForagingQuality::Good);
    }

    #[test]
    fn test_first_match_wins_when_tiers_overlap() {
        // Satisfies perfect and good at once
        let (t, r, h, w) = (22.0, 5.0, 95.0, 4.0);
        let thresholds = QualityThresholds::default();
        assert!(thresholds.tiers[0].matches(t, r, h, w));
        assert!(thresholds.tiers[1].matches(t, r, h, w));
        assert_eq!(classify_quality(t, r, h, w), ForagingQuality::Perfect);
    }

    #[test]
    fn test_extreme_values_still_perfect() {
        assert_eq!(
            classify_quality(45.0, -3.0, 250.0, -10.0),
            ForagingQuality::Perfect
        );
    }

    #[test]
    fn test_average_tier() {
        assert_eq!(classify_quality(13.0, 8.0, 65.0, 14.0), ForagingQuality::Average);
    }

    #[test]
    fn test_dry_air_falls_through_to_poor() {
        // Temperature and rain look perfect, humidity does not clear any tier
        assert_eq!(classify_quality(25.0, 5.0, 40.0, 3.0), ForagingQuality::Poor);
    }

    #[test]
    fn test_heavy_rain_gap() {
        // Too wet for good/average, too dry-aired for perfect
        assert_eq!(classify_quality(20.0, 30.0, 85.0, 5.0), ForagingQuality::Poor);
    }

    #[test]
    fn test_zeroes_are_poor() {
        assert_eq!(classify_quality(0.0, 0.0, 0.0, 0.0), ForagingQuality::Poor);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = QualityThresholds { tiers: vec![] };
        assert_eq!(thresholds.classify(20.0, 2.0, 95.0, 1.0), ForagingQuality::Poor);
    }

    #[test]
    fn test_quality_serializes_lowercase() {
        let json = serde_json::to_string(&ForagingQuality::Average).unwrap();
        assert_eq!(json, "\"average\"");
        assert_eq!(ForagingQuality::Good.to_string(), "good");
    }

    #[test]
    fn test_quality_parses_its_own_labels() {
        for q in [
            ForagingQuality::Perfect,
            ForagingQuality::Good,
            ForagingQuality::Average,
            ForagingQuality::Poor,
        ] {
            assert_eq!(q.as_str().parse::<ForagingQuality>(), Ok(q));
        }
        assert!("excellent".parse::<ForagingQuality>().is_err());
    }
}
