//! Journal service: each user's private log of finds and outings

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::JournalEntry;
use shared::foraging::ForagingQuality;
use shared::types::{PaginatedResponse, Pagination};

/// Journal service
#[derive(Clone)]
pub struct JournalService {
    db: PgPool,
}

/// Journal entry row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JournalEntryRow {
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
    pub foraging_quality: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JournalEntryRow> for JournalEntry {
    fn from(row: JournalEntryRow) -> Self {
        JournalEntry {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            species: row.species,
            location_name: row.location_name,
            latitude: row.latitude,
            longitude: row.longitude,
            found_on: row.found_on,
            quantity: row.quantity,
            foraging_quality: row
                .foraging_quality
                .as_deref()
                .and_then(|q| q.parse::<ForagingQuality>().ok()),
            photo_url: row.photo_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a journal entry
#[derive(Debug, Deserialize)]
pub struct CreateJournalEntryInput {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub species: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub found_on: Option<NaiveDate>,
    pub quantity: Option<i32>,
    pub foraging_quality: Option<ForagingQuality>,
    pub photo_url: Option<String>,
}

/// Input for updating a journal entry; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateJournalEntryInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub species: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub found_on: Option<NaiveDate>,
    pub quantity: Option<i32>,
    pub foraging_quality: Option<ForagingQuality>,
    pub photo_url: Option<String>,
}

pub(crate) const ENTRY_COLUMNS: &str = "id, user_id, title, content, species, location_name, \
     latitude, longitude, found_on, quantity, foraging_quality, photo_url, created_at, updated_at";

impl JournalService {
    /// Create a new JournalService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the user's entries, newest first
    pub async fn list_entries(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<JournalEntry>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM journal_entries WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, JournalEntryRow>(&format!(
            r#"
            SELECT {}
            FROM journal_entries
            WHERE user_id = $1
            ORDER BY COALESCE(found_on, created_at::date) DESC, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            ENTRY_COLUMNS
        ))
        .bind(user_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(Into::into).collect(),
            pagination,
            total.max(0) as u64,
        ))
    }

    /// Get one of the user's entries
    pub async fn get_entry(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<JournalEntry> {
        self.fetch_row(user_id, entry_id).await.map(Into::into)
    }

    /// Create a journal entry
    pub async fn create_entry(
        &self,
        user_id: Uuid,
        input: CreateJournalEntryInput,
    ) -> AppResult<JournalEntry> {
        shared::validate_title(&input.title)?;
        shared::validate_journal_content(&input.content)?;
        shared::validate_optional_coordinates(input.latitude, input.longitude)?;
        shared::validate_species(input.species.as_deref())?;
        shared::validate_location_name(input.location_name.as_deref())?;
        shared::validate_quantity(input.quantity)?;
        shared::validate_url("photo_url", input.photo_url.as_deref())?;

        let row = sqlx::query_as::<_, JournalEntryRow>(&format!(
            r#"
            INSERT INTO journal_entries (
                user_id, title, content, species, location_name, latitude, longitude,
                found_on, quantity, foraging_quality, photo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            ENTRY_COLUMNS
        ))
        .bind(user_id)
        .bind(input.title.trim())
        .bind(&input.content)
        .bind(&input.species)
        .bind(&input.location_name)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.found_on)
        .bind(input.quantity)
        .bind(input.foraging_quality.map(|q| q.as_str()))
        .bind(&input.photo_url)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(entry_id = %row.id, %user_id, "Journal entry created");

        Ok(row.into())
    }

    /// Update a journal entry
    pub async fn update_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        input: UpdateJournalEntryInput,
    ) -> AppResult<JournalEntry> {
        let existing = self.fetch_row(user_id, entry_id).await?;

        if let Some(ref title) = input.title {
            shared::validate_title(title)?;
        }
        if let Some(ref content) = input.content {
            shared::validate_journal_content(content)?;
        }
        shared::validate_species(input.species.as_deref())?;
        shared::validate_location_name(input.location_name.as_deref())?;
        shared::validate_quantity(input.quantity)?;
        shared::validate_url("photo_url", input.photo_url.as_deref())?;

        let title = input
            .title
            .map(|t| t.trim().to_string())
            .unwrap_or(existing.title);
        let content = input.content.unwrap_or(existing.content);
        let species = input.species.or(existing.species);
        let location_name = input.location_name.or(existing.location_name);
        let latitude = input.latitude.or(existing.latitude);
        let longitude = input.longitude.or(existing.longitude);
        let found_on = input.found_on.or(existing.found_on);
        let quantity = input.quantity.or(existing.quantity);
        let foraging_quality = input
            .foraging_quality
            .map(|q| q.as_str().to_string())
            .or(existing.foraging_quality);
        let photo_url = input.photo_url.or(existing.photo_url);

        shared::validate_optional_coordinates(latitude, longitude)?;

        let row = sqlx::query_as::<_, JournalEntryRow>(&format!(
            r#"
            UPDATE journal_entries
            SET title = $1, content = $2, species = $3, location_name = $4,
                latitude = $5, longitude = $6, found_on = $7, quantity = $8,
                foraging_quality = $9, photo_url = $10, updated_at = NOW()
            WHERE id = $11 AND user_id = $12
            RETURNING {}
            "#,
            ENTRY_COLUMNS
        ))
        .bind(&title)
        .bind(&content)
        .bind(&species)
        .bind(&location_name)
        .bind(latitude)
        .bind(longitude)
        .bind(found_on)
        .bind(quantity)
        .bind(&foraging_quality)
        .bind(&photo_url)
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Journal entry".to_string()))?;

        Ok(row.into())
    }

    /// Delete a journal entry
    pub async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Journal entry".to_string()));
        }

        Ok(())
    }

    async fn fetch_row(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<JournalEntryRow> {
        sqlx::query_as::<_, JournalEntryRow>(&format!(
            "SELECT {} FROM journal_entries WHERE id = $1 AND user_id = $2",
            ENTRY_COLUMNS
        ))
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Journal entry".to_string()))
    }
}
