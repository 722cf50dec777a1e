//! Foraging condition evaluation
//!
//! Reduces a trailing window of weather readings to four averages, grades the
//! conditions into a [`ForagingQuality`] tier and lists the species whose
//! tolerance profile covers those averages. Everything here is pure; the
//! profile table and thresholds live in an immutable [`ForagingConfig`].

mod profiles;
mod quality;
mod season;

pub use profiles::*;
pub use quality::*;
pub use season::*;

use serde::{Deserialize, Serialize};

/// Number of days in the trailing window, today included
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Raw readings over the trailing window. `None` marks a missing reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherSamples {
    /// Hourly air temperature (°C)
    #[serde(default)]
    pub temperature: Vec<Option<f64>>,
    /// Hourly relative humidity (%)
    #[serde(default)]
    pub humidity: Vec<Option<f64>>,
    /// Hourly wind speed (km/h)
    #[serde(default)]
    pub wind_speed: Vec<Option<f64>>,
    /// Daily precipitation totals (mm)
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
}

/// Window averages; each is 0 when its series has no readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyAverages {
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_rain: f64,
    pub avg_wind: f64,
}

impl DailyAverages {
    pub fn from_samples(samples: &WeatherSamples) -> Self {
        Self {
            avg_temperature: average(&samples.temperature),
            avg_humidity: average(&samples.humidity),
            avg_rain: average(&samples.precipitation),
            avg_wind: average(&samples.wind_speed),
        }
    }
}

/// Evaluation output handed back to the request layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForagingEvaluation {
    pub avg_temperature: f64,
    pub avg_precipitation: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    pub foraging_quality: ForagingQuality,
    pub recommended_mushrooms: Vec<String>,
}

/// Threshold tiers plus the species table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForagingConfig {
    pub thresholds: QualityThresholds,
    pub profiles: Vec<MushroomProfile>,
}

impl Default for ForagingConfig {
    fn default() -> Self {
        Self {
            thresholds: QualityThresholds::default(),
            profiles: default_profiles(),
        }
    }
}

/// Stateless evaluator bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct ForagingEvaluator {
    config: ForagingConfig,
}

impl ForagingEvaluator {
    pub fn new(config: ForagingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForagingConfig {
        &self.config
    }

    pub fn profiles(&self) -> &[MushroomProfile] {
        &self.config.profiles
    }

    /// Average the window, classify it and match species
    pub fn evaluate(&self, samples: &WeatherSamples) -> ForagingEvaluation {
        self.evaluate_averages(DailyAverages::from_samples(samples))
    }

    pub fn evaluate_averages(&self, averages: DailyAverages) -> ForagingEvaluation {
        let DailyAverages {
            avg_temperature,
            avg_humidity,
            avg_rain,
            avg_wind,
        } = averages;

        let foraging_quality =
            self.config
                .thresholds
                .classify(avg_temperature, avg_rain, avg_humidity, avg_wind);

        let recommended_mushrooms = recommend_species(
            avg_temperature,
            avg_humidity,
            avg_rain,
            avg_wind,
            &self.config.profiles,
        );

        ForagingEvaluation {
            avg_temperature,
            avg_precipitation: avg_rain,
            avg_humidity,
            avg_wind_speed: avg_wind,
            foraging_quality,
            recommended_mushrooms,
        }
    }
}

/// Mean of the present values; 0 when there are none
pub fn average(values: &[Option<f64>]) -> f64 {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Names of every profile that tolerates all four averages, in table order
pub fn recommend_species(
    avg_temp: f64,
    avg_humidity: f64,
    avg_rain: f64,
    avg_wind: f64,
    profiles: &[MushroomProfile],
) -> Vec<String> {
    profiles
        .iter()
        .filter(|p| p.tolerates(avg_temp, avg_humidity, avg_rain, avg_wind))
        .map(|p| p.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn porcini() -> MushroomProfile {
        MushroomProfile::new("porcini", (12.0, 28.0), 70.0, (0.1, 80.0), 16.0)
    }

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_average_empty() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn test_average_all_missing() {
        assert_eq!(average(&[None, None]), 0.0);
    }

    #[test]
    fn test_average_skips_missing() {
        assert_eq!(average(&[Some(10.0), None, Some(20.0)]), 15.0);
    }

    #[test]
    fn test_recommend_porcini_wind_cutoff() {
        let profiles = vec![porcini()];
        assert_eq!(recommend_species(20.0, 75.0, 10.0, 5.0, &profiles), vec!["porcini"]);
        assert!(recommend_species(20.0, 75.0, 10.0, 20.0, &profiles).is_empty());
    }

    #[test]
    fn test_recommend_inclusive_bounds() {
        let profiles = vec![porcini()];
        assert_eq!(recommend_species(12.0, 75.0, 10.0, 5.0, &profiles).len(), 1);
        assert_eq!(recommend_species(28.0, 75.0, 10.0, 5.0, &profiles).len(), 1);
        assert_eq!(recommend_species(20.0, 70.0, 10.0, 5.0, &profiles).len(), 1);
        assert_eq!(recommend_species(20.0, 75.0, 10.0, 16.0, &profiles).len(), 1);
    }

    #[test]
    fn test_recommend_keeps_table_order() {
        let result = recommend_species(18.0, 90.0, 5.0, 5.0, &default_profiles());
        let order: Vec<usize> = result
            .iter()
            .map(|name| {
                default_profiles()
                    .iter()
                    .position(|p| &p.name == name)
                    .unwrap()
            })
            .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
        assert!(result.contains(&"porcini".to_string()));
    }

    #[test]
    fn test_evaluate_perfect_window() {
        let samples = WeatherSamples {
            temperature: some(&[18.0, 19.0, 20.0, 21.0, 22.0]),
            humidity: some(&[91.0, 92.0, 90.0, 93.0, 89.0]),
            wind_speed: some(&[7.0, 8.0, 6.0, 5.0, 9.0]),
            precipitation: some(&[5.0, 3.0, 2.0, 0.0, 1.0]),
        };

        let result = ForagingEvaluator::default().evaluate(&samples);

        assert_eq!(result.avg_temperature, 20.0);
        assert_eq!(result.avg_humidity, 91.0);
        assert_eq!(result.avg_wind_speed, 7.0);
        assert!((result.avg_precipitation - 2.2).abs() < 1e-9);
        assert_eq!(result.foraging_quality, ForagingQuality::Perfect);
    }

    #[test]
    fn test_evaluate_all_missing() {
        let samples = WeatherSamples {
            temperature: vec![None; 24],
            humidity: vec![None; 24],
            wind_speed: vec![None; 24],
            precipitation: vec![None; 7],
        };

        let result = ForagingEvaluator::default().evaluate(&samples);

        assert_eq!(result.avg_temperature, 0.0);
        assert_eq!(result.avg_humidity, 0.0);
        assert_eq!(result.avg_wind_speed, 0.0);
        assert_eq!(result.avg_precipitation, 0.0);
        assert_eq!(result.foraging_quality, ForagingQuality::Poor);
        assert!(result.recommended_mushrooms.is_empty());
    }

    #[test]
    fn test_evaluator_uses_its_own_table() {
        let evaluator = ForagingEvaluator::new(ForagingConfig {
            thresholds: QualityThresholds::default(),
            profiles: vec![porcini()],
        });
        let averages = DailyAverages {
            avg_temperature: 20.0,
            avg_humidity: 75.0,
            avg_rain: 10.0,
            avg_wind: 5.0,
        };

        let result = evaluator.evaluate_averages(averages);
        assert_eq!(result.recommended_mushrooms, vec!["porcini"]);
        assert_eq!(result.foraging_quality, ForagingQuality::Good);
    }

    #[test]
    fn test_samples_deserialize_with_nulls() {
        let samples: WeatherSamples =
            serde_json::from_str(r#"{"temperature": [1.5, null], "precipitation": []}"#).unwrap();
        assert_eq!(samples.temperature, vec![Some(1.5), None]);
        assert!(samples.humidity.is_empty());
    }
}
