//! Foraging service: fetch the trailing weather window and grade it

use chrono::{Days, NaiveDate};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::weather::{fallback_window, WeatherClient, WeatherWindow};
use shared::foraging::{ForagingEvaluator, Season};
use shared::models::{ForagingReport, WeatherDataSource};
use shared::types::GpsCoordinates;

/// Foraging service
#[derive(Clone)]
pub struct ForagingService {
    weather_client: WeatherClient,
    evaluator: Arc<ForagingEvaluator>,
    window_days: u32,
    use_fallback: bool,
}

impl ForagingService {
    /// Create a new ForagingService instance
    pub fn new(
        weather_client: WeatherClient,
        evaluator: Arc<ForagingEvaluator>,
        window_days: u32,
        use_fallback: bool,
    ) -> Self {
        Self {
            weather_client,
            evaluator,
            window_days: window_days.max(1),
            use_fallback,
        }
    }

    /// Evaluate foraging conditions at a coordinate for the window ending `today`
    pub async fn check_conditions(
        &self,
        location: GpsCoordinates,
        location_name: Option<String>,
        today: NaiveDate,
    ) -> AppResult<ForagingReport> {
        shared::validate_coordinates(location.latitude, location.longitude)?;

        let (window, data_source) = match self
            .weather_client
            .fetch_window(location.latitude, location.longitude, self.window_days)
            .await
        {
            Ok(window) => (window, WeatherDataSource::OpenMeteo),
            Err(e) if self.use_fallback => {
                tracing::warn!(error = %e, "Weather fetch failed, evaluating fallback samples");
                (fallback_window(self.window_days), WeatherDataSource::Fallback)
            }
            Err(e) => {
                tracing::error!(error = %e, "Weather fetch failed");
                return Err(AppError::WeatherServiceUnavailable);
            }
        };

        Ok(self.build_report(location, location_name, today, window, data_source))
    }

    fn build_report(
        &self,
        location: GpsCoordinates,
        location_name: Option<String>,
        today: NaiveDate,
        window: WeatherWindow,
        data_source: WeatherDataSource,
    ) -> ForagingReport {
        let evaluation = self.evaluator.evaluate(&window.samples);

        tracing::debug!(
            timezone = window.timezone.as_deref().unwrap_or("unknown"),
            hours = window.samples.temperature.len(),
            days = window.samples.precipitation.len(),
            "Weather window collected"
        );

        tracing::info!(
            latitude = %location.latitude,
            longitude = %location.longitude,
            quality = %evaluation.foraging_quality,
            species = evaluation.recommended_mushrooms.len(),
            "Foraging conditions evaluated"
        );

        ForagingReport {
            location,
            location_name,
            season: Season::for_date(today),
            window_start: window_start(today, self.window_days),
            window_end: today,
            data_source,
            current: window.current,
            evaluation,
        }
    }
}

/// First day of a window of `window_days` days ending on `today`
pub fn window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(window_days.saturating_sub(1) as u64))
        .unwrap_or(today)
}
