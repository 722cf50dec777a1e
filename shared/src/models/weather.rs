//! Weather and foraging report models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::foraging::{ForagingEvaluation, Season};
use crate::types::GpsCoordinates;

/// Current conditions at the queried coordinate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub observed_at: Option<DateTime<Utc>>,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub precipitation_mm: Option<f64>,
    /// WMO weather interpretation code
    pub weather_code: Option<i32>,
}

/// Where the samples behind a report came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherDataSource {
    OpenMeteo,
    Fallback,
}

/// Full "check conditions" response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForagingReport {
    pub location: GpsCoordinates,
    pub location_name: Option<String>,
    pub season: Season,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub data_source: WeatherDataSource,
    pub current: Option<CurrentConditions>,
    #[serde(flatten)]
    pub evaluation: ForagingEvaluation,
}
