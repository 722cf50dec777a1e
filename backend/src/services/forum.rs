//! Forum service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::ForumPost;
use shared::types::{PaginatedResponse, Pagination};

/// Forum service
#[derive(Clone)]
pub struct ForumService {
    db: PgPool,
}

/// Forum post with its author's username
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ForumPostRow {
    pub id: Uuid,
    pub author_id: Option<Uuid>,
    pub author_username: Option<String>,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ForumPostRow> for ForumPost {
    fn from(row: ForumPostRow) -> Self {
        ForumPost {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            body: row.body,
            link: row.link,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a forum post
#[derive(Debug, Deserialize)]
pub struct CreateForumPostInput {
    pub title: String,
    pub body: String,
    pub link: Option<String>,
}

const POST_SELECT: &str = r#"
    SELECT p.id, p.author_id, u.username AS author_username, p.title, p.body, p.link, p.created_at
    FROM forum_posts p
    LEFT JOIN users u ON u.id = p.author_id
"#;

impl ForumService {
    /// Create a new ForumService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List posts, newest first
    pub async fn list_posts(
        &self,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<ForumPostRow>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM forum_posts")
            .fetch_one(&self.db)
            .await?;

        let posts = sqlx::query_as::<_, ForumPostRow>(&format!(
            "{} ORDER BY p.created_at DESC LIMIT $1 OFFSET $2",
            POST_SELECT
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse::new(posts, pagination, total.max(0) as u64))
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> AppResult<ForumPostRow> {
        sqlx::query_as::<_, ForumPostRow>(&format!("{} WHERE p.id = $1", POST_SELECT))
            .bind(post_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Forum post".to_string()))
    }

    /// Create a post
    pub async fn create_post(
        &self,
        author: &AuthUser,
        input: CreateForumPostInput,
    ) -> AppResult<ForumPostRow> {
        shared::validate_title(&input.title)?;
        shared::validate_forum_body(&input.body)?;
        shared::validate_url("link", input.link.as_deref())?;

        let post_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO forum_posts (author_id, title, body, link)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(author.user_id)
        .bind(input.title.trim())
        .bind(&input.body)
        .bind(&input.link)
        .fetch_one(&self.db)
        .await?;

        self.get_post(post_id).await
    }

    /// Delete a post; allowed for its author and for admins
    pub async fn delete_post(&self, actor: &AuthUser, post_id: Uuid) -> AppResult<()> {
        let post: ForumPost = self.get_post(post_id).await?.into();

        if !can_delete(actor, &post) {
            return Err(AppError::InsufficientPermissions);
        }

        sqlx::query("DELETE FROM forum_posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.db)
            .await?;

        tracing::info!(%post_id, actor = %actor.user_id, "Forum post deleted");

        Ok(())
    }
}

fn can_delete(actor: &AuthUser, post: &ForumPost) -> bool {
    actor.is_admin || post.author_id == Some(actor.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            username: "tester".to_string(),
            is_admin,
        }
    }

    fn post(author_id: Option<Uuid>) -> ForumPost {
        ForumPost {
            id: Uuid::new_v4(),
            author_id,
            title: "First morels of spring".to_string(),
            body: "Found a handful near the old orchard.".to_string(),
            link: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_author_can_delete() {
        let author = user(false);
        assert!(can_delete(&author, &post(Some(author.user_id))));
    }

    #[test]
    fn test_other_member_cannot_delete() {
        assert!(!can_delete(&user(false), &post(Some(Uuid::new_v4()))));
        assert!(!can_delete(&user(false), &post(None)));
    }

    #[test]
    fn test_admin_can_delete_anything() {
        assert!(can_delete(&user(true), &post(Some(Uuid::new_v4()))));
        assert!(can_delete(&user(true), &post(None)));
    }
}
