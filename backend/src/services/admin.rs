//! Admin service for dashboards, user management and journal export

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use shared::types::{PaginatedResponse, Pagination};

/// Admin service
#[derive(Clone)]
pub struct AdminService {
    db: PgPool,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub total_users: i64,
    pub admin_users: i64,
    pub total_journal_entries: i64,
    pub entries_last_7_days: i64,
    pub total_forum_posts: i64,
    pub top_species: Vec<SpeciesCount>,
}

/// How often a species appears in journals
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SpeciesCount {
    pub species: String,
    pub entry_count: i64,
}

/// User overview row
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub journal_entries: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Journal entry with author, for admin views and export
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AdminJournalRow {
    pub id: Uuid,
    pub username: String,
    pub title: String,
    pub species: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub found_on: Option<NaiveDate>,
    pub quantity: Option<i32>,
    pub foraging_quality: Option<String>,
    pub created_at: DateTime<Utc>,
}

const TOP_SPECIES_LIMIT: i64 = 10;

const ADMIN_JOURNAL_SELECT: &str = r#"
    SELECT j.id, u.username, j.title, j.species, j.location_name, j.latitude, j.longitude,
           j.found_on, j.quantity, j.foraging_quality, j.created_at
    FROM journal_entries j
    JOIN users u ON u.id = j.user_id
    ORDER BY j.created_at DESC
"#;

impl AdminService {
    /// Create a new AdminService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Aggregate counts for the admin dashboard
    pub async fn get_dashboard(&self) -> AppResult<DashboardMetrics> {
        let (total_users, admin_users) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_admin) FROM users",
        )
        .fetch_one(&self.db)
        .await?;

        let (total_journal_entries, entries_last_7_days) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE created_at > NOW() - INTERVAL '7 days')
            FROM journal_entries
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let total_forum_posts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM forum_posts")
            .fetch_one(&self.db)
            .await?;

        let top_species = sqlx::query_as::<_, SpeciesCount>(
            r#"
            SELECT LOWER(species) AS species, COUNT(*) AS entry_count
            FROM journal_entries
            WHERE species IS NOT NULL AND species <> ''
            GROUP BY LOWER(species)
            ORDER BY entry_count DESC, species ASC
            LIMIT $1
            "#,
        )
        .bind(TOP_SPECIES_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(DashboardMetrics {
            total_users,
            admin_users,
            total_journal_entries,
            entries_last_7_days,
            total_forum_posts,
            top_species,
        })
    }

    /// List all users with their journal counts
    pub async fn list_users(
        &self,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<UserSummary>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await?;

        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT u.id, u.username, u.email, u.is_admin, u.is_active,
                   COUNT(j.id) AS journal_entries, u.last_login_at, u.created_at
            FROM users u
            LEFT JOIN journal_entries j ON j.user_id = u.id
            GROUP BY u.id
            ORDER BY u.created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse::new(users, pagination, total.max(0) as u64))
    }

    /// Grant or revoke admin rights
    pub async fn set_admin(&self, actor: &AuthUser, user_id: Uuid, is_admin: bool) -> AppResult<()> {
        if actor.user_id == user_id && !is_admin {
            return Err(AppError::Validation {
                field: "is_admin".to_string(),
                message: "Admins cannot revoke their own admin rights".to_string(),
            });
        }

        let result = sqlx::query("UPDATE users SET is_admin = $1, updated_at = NOW() WHERE id = $2")
            .bind(is_admin)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        tracing::info!(%user_id, is_admin, actor = %actor.user_id, "User role changed");

        Ok(())
    }

    /// Delete a user; their journal and tokens cascade, forum posts are kept
    pub async fn delete_user(&self, actor: &AuthUser, user_id: Uuid) -> AppResult<()> {
        if actor.user_id == user_id {
            return Err(AppError::Validation {
                field: "user_id".to_string(),
                message: "Admins cannot delete their own account".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        tracing::info!(%user_id, actor = %actor.user_id, "User deleted");

        Ok(())
    }

    /// All journal entries across users
    pub async fn list_journal(
        &self,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<AdminJournalRow>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM journal_entries")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, AdminJournalRow>(&format!(
            "{} LIMIT $1 OFFSET $2",
            ADMIN_JOURNAL_SELECT
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse::new(rows, pagination, total.max(0) as u64))
    }

    /// Export every journal entry as CSV
    pub async fn export_journal_csv(&self) -> AppResult<String> {
        let rows = sqlx::query_as::<_, AdminJournalRow>(ADMIN_JOURNAL_SELECT)
            .fetch_all(&self.db)
            .await?;

        journal_to_csv(&rows)
    }
}

/// Render journal rows as CSV with a header line
pub fn journal_to_csv(rows: &[AdminJournalRow]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "id",
            "username",
            "title",
            "species",
            "location_name",
            "latitude",
            "longitude",
            "found_on",
            "quantity",
            "foraging_quality",
            "created_at",
        ])
        .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

    for row in rows {
        writer
            .write_record([
                row.id.to_string(),
                row.username.clone(),
                row.title.clone(),
                row.species.clone().unwrap_or_default(),
                row.location_name.clone().unwrap_or_default(),
                row.latitude.map(|v| v.to_string()).unwrap_or_default(),
                row.longitude.map(|v| v.to_string()).unwrap_or_default(),
                row.found_on.map(|d| d.to_string()).unwrap_or_default(),
                row.quantity.map(|q| q.to_string()).unwrap_or_default(),
                row.foraging_quality.clone().unwrap_or_default(),
                row.created_at.to_rfc3339(),
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV flush failed: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = journal_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("id,username,title,"));
    }

    #[test]
    fn test_csv_quotes_commas_and_blanks_missing_fields() {
        let row = AdminJournalRow {
            id: Uuid::nil(),
            username: "forager".to_string(),
            title: "Oysters, lots of them".to_string(),
            species: Some("oyster".to_string()),
            location_name: None,
            latitude: Some(Decimal::from_str("46.2044").unwrap()),
            longitude: None,
            found_on: NaiveDate::from_ymd_opt(2024, 10, 5),
            quantity: Some(30),
            foraging_quality: Some("good".to_string()),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };

        let csv = journal_to_csv(&[row]).unwrap();
        let line = csv.lines().nth(1).unwrap();

        assert!(line.contains("\"Oysters, lots of them\""));
        assert!(line.contains(",46.2044,,2024-10-05,30,good,"));
    }
}
