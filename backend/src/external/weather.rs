//! Weather API client for fetching the foraging window
//!
//! Integrates with the Open-Meteo forecast API: hourly temperature, humidity,
//! wind and precipitation for the trailing window plus a current-conditions
//! snapshot, all in one request. Rain is summed per local day from the
//! observed hours only.

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use shared::foraging::WeatherSamples;
use shared::models::CurrentConditions;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

/// Samples for the trailing window plus the latest observation
#[derive(Debug, Clone)]
pub struct WeatherWindow {
    pub samples: WeatherSamples,
    pub current: Option<CurrentConditions>,
    pub timezone: Option<String>,
}

/// Open-Meteo forecast response (`timeformat=unixtime`)
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    utc_offset_seconds: i64,
    #[serde(default)]
    hourly: Option<OMHourly>,
    #[serde(default)]
    current: Option<OMCurrent>,
}

#[derive(Debug, Deserialize)]
struct OMHourly {
    #[serde(default)]
    time: Vec<i64>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OMCurrent {
    time: Option<i64>,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<i32>,
}

/// Open-Meteo error body
#[derive(Debug, Deserialize)]
struct OMError {
    reason: String,
}

impl WeatherClient {
    /// Create a new WeatherClient against the given Open-Meteo base URL
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch `window_days` days of samples ending today
    pub async fn fetch_window(
        &self,
        latitude: Decimal,
        longitude: Decimal,
        window_days: u32,
    ) -> AppResult<WeatherWindow> {
        let url = format!("{}/v1/forecast", self.base_url);
        let past_days = window_days.saturating_sub(1).to_string();
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        tracing::debug!(%latitude, %longitude, window_days, "Fetching weather window");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                (
                    "hourly",
                    "temperature_2m,relative_humidity_2m,wind_speed_10m,precipitation",
                ),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,wind_speed_10m,precipitation,weather_code",
                ),
                ("past_days", past_days.as_str()),
                ("forecast_days", "1"),
                ("wind_speed_unit", "kmh"),
                ("timezone", "auto"),
                ("timeformat", "unixtime"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<OMError>(&body)
                .map(|e| e.reason)
                .unwrap_or(body);
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, reason
            )));
        }

        let data: OpenMeteoResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_response(data, Utc::now()))
    }
}

/// Drop hourly readings later than `now`; the forecast day runs past it
fn convert_response(data: OpenMeteoResponse, now: DateTime<Utc>) -> WeatherWindow {
    let cutoff = now.timestamp();

    let mut samples = WeatherSamples::default();

    if let Some(hourly) = data.hourly {
        let observed = hourly.time.iter().take_while(|&&t| t <= cutoff).count();
        samples.temperature = hourly.temperature_2m.into_iter().take(observed).collect();
        samples.humidity = hourly
            .relative_humidity_2m
            .into_iter()
            .take(observed)
            .collect();
        samples.wind_speed = hourly.wind_speed_10m.into_iter().take(observed).collect();
        samples.precipitation = daily_totals(
            &hourly.time[..observed],
            &hourly.precipitation,
            data.utc_offset_seconds,
        );
    }

    let current = data.current.map(|c| CurrentConditions {
        observed_at: c.time.and_then(|t| DateTime::from_timestamp(t, 0)),
        temperature_celsius: c.temperature_2m,
        humidity_percent: c.relative_humidity_2m,
        wind_speed_kmh: c.wind_speed_10m,
        precipitation_mm: c.precipitation,
        weather_code: c.weather_code,
    });

    WeatherWindow {
        samples,
        current,
        timezone: data.timezone,
    }
}

/// Sum hourly rain into one total per local calendar day, oldest first.
/// A day whose hours are all missing has no total.
fn daily_totals(times: &[i64], rain: &[Option<f64>], utc_offset: i64) -> Vec<Option<f64>> {
    let mut days: Vec<(i64, Option<f64>)> = Vec::new();

    for (t, mm) in times.iter().zip(rain) {
        let day = (t + utc_offset).div_euclid(86_400);
        match days.last_mut() {
            Some((current, total)) if *current == day => {
                if let Some(mm) = mm {
                    *total = Some(total.unwrap_or(0.0) + mm);
                }
            }
            _ => days.push((day, *mm)),
        }
    }

    days.into_iter().map(|(_, total)| total).collect()
}

/// Mild autumn readings evaluated when the weather source cannot be reached
pub fn fallback_window(window_days: u32) -> WeatherWindow {
    const TEMPERATURE_C: f64 = 15.0;
    const HUMIDITY_PERCENT: f64 = 75.0;
    const WIND_KMH: f64 = 10.0;
    const DAILY_RAIN_MM: f64 = 2.0;

    let hours = window_days as usize * 24;
    WeatherWindow {
        samples: WeatherSamples {
            temperature: vec![Some(TEMPERATURE_C); hours],
            humidity: vec![Some(HUMIDITY_PERCENT); hours],
            wind_speed: vec![Some(WIND_KMH); hours],
            precipitation: vec![Some(DAILY_RAIN_MM); window_days as usize],
        },
        current: None,
        timezone: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::foraging::{ForagingEvaluator, ForagingQuality};

    const SAMPLE: &str = r#"{
        "latitude": 46.2,
        "longitude": 6.14,
        "timezone": "Europe/Zurich",
        "utc_offset_seconds": 3600,
        "current": {
            "time": 1700000000,
            "temperature_2m": 11.5,
            "relative_humidity_2m": 88,
            "wind_speed_10m": 6.1,
            "precipitation": 0.2,
            "weather_code": 61
        },
        "hourly": {
            "time": [1699996400, 1700000000, 1700003600],
            "temperature_2m": [10.0, null, 14.0],
            "relative_humidity_2m": [80, 90, 99],
            "wind_speed_10m": [5.0, 7.0, 30.0],
            "precipitation": [1.5, null, 30.0]
        }
    }"#;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_100, 0).unwrap()
    }

    #[test]
    fn test_convert_drops_future_hours() {
        let data: OpenMeteoResponse = serde_json::from_str(SAMPLE).unwrap();
        let window = convert_response(data, now());

        assert_eq!(window.samples.temperature, vec![Some(10.0), None]);
        assert_eq!(window.samples.humidity, vec![Some(80.0), Some(90.0)]);
        assert_eq!(window.samples.wind_speed, vec![Some(5.0), Some(7.0)]);
        assert_eq!(window.samples.precipitation, vec![Some(1.5)]);
        assert_eq!(window.timezone.as_deref(), Some("Europe/Zurich"));
    }

    #[test]
    fn test_rain_excludes_rest_of_today() {
        // 22:00 and 23:00 of day 10, then 00:00 to 02:00 of day 11; now is 01:00
        let day = 86_400;
        let json = format!(
            r#"{{
                "utc_offset_seconds": 0,
                "hourly": {{
                    "time": [{}, {}, {}, {}, {}],
                    "precipitation": [1.0, 2.0, 0.5, null, 30.0]
                }}
            }}"#,
            10 * day + 22 * 3600,
            10 * day + 23 * 3600,
            11 * day,
            11 * day + 3600,
            11 * day + 7200,
        );
        let data: OpenMeteoResponse = serde_json::from_str(&json).unwrap();
        let now = DateTime::from_timestamp(11 * day + 3600, 0).unwrap();

        let window = convert_response(data, now);
        assert_eq!(window.samples.precipitation, vec![Some(3.0), Some(0.5)]);
    }

    #[test]
    fn test_daily_totals_local_days() {
        // 23:30 UTC is already the next day at UTC+1
        let times = [23 * 3600 + 1800, 86_400 + 3600];
        let rain = [Some(2.0), Some(1.0)];
        assert_eq!(daily_totals(&times, &rain, 0), vec![Some(2.0), Some(1.0)]);
        assert_eq!(daily_totals(&times, &rain, 3600), vec![Some(3.0)]);
        assert_eq!(daily_totals(&times, &[None, None], 3600), vec![None]);
    }

    #[test]
    fn test_convert_current_snapshot() {
        let data: OpenMeteoResponse = serde_json::from_str(SAMPLE).unwrap();
        let current = convert_response(data, now()).current.unwrap();

        assert_eq!(current.temperature_celsius, Some(11.5));
        assert_eq!(current.weather_code, Some(61));
        assert_eq!(current.observed_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_convert_missing_sections() {
        let data: OpenMeteoResponse = serde_json::from_str("{}").unwrap();
        let window = convert_response(data, now());
        assert!(window.samples.temperature.is_empty());
        assert!(window.samples.precipitation.is_empty());
        assert!(window.current.is_none());
    }

    #[test]
    fn test_fallback_window_shape() {
        let window = fallback_window(7);
        assert_eq!(window.samples.temperature.len(), 168);
        assert_eq!(window.samples.precipitation.len(), 7);

        let result = ForagingEvaluator::default().evaluate(&window.samples);
        assert_eq!(result.foraging_quality, ForagingQuality::Good);
    }
}
