//! Foraging journal models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::foraging::ForagingQuality;

/// A personal journal entry describing one find or outing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub species: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub found_on: Option<NaiveDate>,
    pub quantity: Option<i32>,
    /// Tier recorded at the time of the outing, if the user checked conditions
    pub foraging_quality: Option<ForagingQuality>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
