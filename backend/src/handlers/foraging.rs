//! Foraging condition handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::services::ForagingService;
use crate::AppState;
use shared::foraging::{ForagingEvaluation, MushroomProfile, WeatherSamples};
use shared::models::ForagingReport;
use shared::types::GpsCoordinates;

#[derive(Debug, Deserialize)]
pub struct ConditionsQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub location_name: Option<String>,
}

/// List the species profile table
pub async fn list_species(State(state): State<AppState>) -> Json<Vec<MushroomProfile>> {
    Json(state.evaluator.profiles().to_vec())
}

/// Evaluate caller-supplied samples
pub async fn evaluate(
    State(state): State<AppState>,
    Json(samples): Json<WeatherSamples>,
) -> Json<ForagingEvaluation> {
    Json(state.evaluator.evaluate(&samples))
}

/// Fetch live weather for a coordinate and evaluate it
pub async fn check_conditions(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ConditionsQuery>,
) -> Result<Json<ForagingReport>, AppError> {
    let service = ForagingService::new(
        state.weather.clone(),
        state.evaluator.clone(),
        state.config.foraging.window_days,
        state.config.weather.use_fallback,
    );

    tracing::debug!(user_id = %current_user.0.user_id, "Checking foraging conditions");

    let location_name = query
        .location_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let report = service
        .check_conditions(
            GpsCoordinates::new(query.latitude, query.longitude),
            location_name,
            Utc::now().date_naive(),
        )
        .await?;

    Ok(Json(report))
}
