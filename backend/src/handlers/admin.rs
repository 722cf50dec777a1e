//! Admin handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::services::admin::{AdminJournalRow, AdminService, DashboardMetrics, UserSummary};
use crate::AppState;
use shared::types::{PaginatedResponse, Pagination};

#[derive(Deserialize)]
pub struct SetRoleRequest {
    pub is_admin: bool,
}

/// Dashboard metrics
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardMetrics>, AppError> {
    let metrics = AdminService::new(state.db.clone()).get_dashboard().await?;
    Ok(Json(metrics))
}

/// List users
pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<UserSummary>>, AppError> {
    let users = AdminService::new(state.db.clone())
        .list_users(&pagination)
        .await?;
    Ok(Json(users))
}

/// Grant or revoke admin rights
pub async fn set_user_role(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetRoleRequest>,
) -> Result<StatusCode, AppError> {
    AdminService::new(state.db.clone())
        .set_admin(&current_user.0, user_id, body.is_admin)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdminService::new(state.db.clone())
        .delete_user(&current_user.0, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// All journal entries
pub async fn list_journal(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<AdminJournalRow>>, AppError> {
    let rows = AdminService::new(state.db.clone())
        .list_journal(&pagination)
        .await?;
    Ok(Json(rows))
}

/// CSV download of every journal entry
pub async fn export_journal(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = AdminService::new(state.db.clone())
        .export_journal_csv()
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"journal_entries.csv\"",
            ),
        ],
        csv,
    ))
}
