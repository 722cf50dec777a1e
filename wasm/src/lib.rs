//! WebAssembly module for Mycoforage
//!
//! Provides client-side computation for:
//! - Foraging quality evaluation from raw samples
//! - Species recommendations
//! - Offline form validation

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::foraging::{
    classify_quality, default_profiles, recommend_species, ForagingEvaluator, Season,
    WeatherSamples,
};

/// Evaluate a JSON `WeatherSamples` payload; returns the evaluation as JSON
#[wasm_bindgen]
pub fn evaluate_conditions(samples_json: &str) -> Result<String, JsValue> {
    let samples: WeatherSamples = serde_json::from_str(samples_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid samples JSON: {}", e)))?;

    let evaluation = ForagingEvaluator::default().evaluate(&samples);

    serde_json::to_string(&evaluation)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode evaluation: {}", e)))
}

/// Classify window averages into a quality label
#[wasm_bindgen]
pub fn classify_foraging_quality(
    avg_temperature: f64,
    avg_rain: f64,
    avg_humidity: f64,
    avg_wind: f64,
) -> String {
    classify_quality(avg_temperature, avg_rain, avg_humidity, avg_wind).to_string()
}

/// Species names tolerating the given averages, comma separated
#[wasm_bindgen]
pub fn recommend_mushrooms(
    avg_temperature: f64,
    avg_humidity: f64,
    avg_rain: f64,
    avg_wind: f64,
) -> String {
    recommend_species(
        avg_temperature,
        avg_humidity,
        avg_rain,
        avg_wind,
        &default_profiles(),
    )
    .join(",")
}

/// Season label for a 1-based month
#[wasm_bindgen]
pub fn season_for_month(month: u32) -> String {
    Season::from_month(month).as_str().to_string()
}

/// Check a coordinate pair before submitting a journal entry
#[wasm_bindgen]
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    match (Decimal::try_from(latitude), Decimal::try_from(longitude)) {
        (Ok(lat), Ok(lon)) => shared::validate_coordinates(lat, lon).is_ok(),
        _ => false,
    }
}

/// Check signup fields before sending them
#[wasm_bindgen]
pub fn is_valid_signup(username: &str, password: &str) -> bool {
    shared::validate_username(username).is_ok() && shared::validate_password(password).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_conditions_json() {
        let json = r#"{
            "temperature": [18.0, 19.0, 20.0, 21.0, 22.0],
            "humidity": [91.0, 92.0, 90.0, 93.0, 89.0],
            "wind_speed": [7.0, 8.0, 6.0, 5.0, 9.0],
            "precipitation": [5.0, 3.0, 2.0, 0.0, 1.0]
        }"#;

        let out: serde_json::Value =
            serde_json::from_str(&evaluate_conditions(json).unwrap()).unwrap();
        assert_eq!(out["foraging_quality"], "perfect");
        assert_eq!(out["avg_temperature"], 20.0);
    }

    #[test]
    fn test_classify_foraging_quality() {
        assert_eq!(classify_foraging_quality(19.0, 40.0, 90.0, 8.0), "perfect");
        assert_eq!(classify_foraging_quality(16.0, 10.0, 75.0, 10.0), "good");
        assert_eq!(classify_foraging_quality(12.0, 5.0, 60.0, 15.0), "average");
        assert_eq!(classify_foraging_quality(0.0, 0.0, 0.0, 0.0), "poor");
    }

    #[test]
    fn test_recommend_mushrooms() {
        assert!(recommend_mushrooms(20.0, 75.0, 10.0, 5.0)
            .split(',')
            .any(|s| s == "porcini"));
        assert_eq!(recommend_mushrooms(0.0, 0.0, 0.0, 0.0), "");
    }

    #[test]
    fn test_season_for_month() {
        assert_eq!(season_for_month(10), "autumn");
        assert_eq!(season_for_month(1), "winter");
    }

    #[test]
    fn test_is_valid_coordinate() {
        assert!(is_valid_coordinate(46.2044, 6.1432));
        assert!(!is_valid_coordinate(91.0, 0.0));
        assert!(!is_valid_coordinate(0.0, -180.5));
    }

    #[test]
    fn test_is_valid_signup() {
        assert!(is_valid_signup("morel_hunter", "chanterelle"));
        assert!(!is_valid_signup("mo", "chanterelle"));
        assert!(!is_valid_signup("morel hunter", "chanterelle"));
        assert!(!is_valid_signup("morel_hunter", "short"));
    }
}
