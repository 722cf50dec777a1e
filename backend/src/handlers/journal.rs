//! Foraging journal HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::journal::{CreateJournalEntryInput, JournalService, UpdateJournalEntryInput};
use crate::AppState;
use shared::types::Pagination;

/// List the current user's journal entries
pub async fn list_entries(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = JournalService::new(state.db.clone());

    match service.list_entries(current_user.0.user_id, &pagination).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a single journal entry
pub async fn get_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = JournalService::new(state.db.clone());

    match service.get_entry(current_user.0.user_id, entry_id).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a journal entry
pub async fn create_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateJournalEntryInput>,
) -> impl IntoResponse {
    let service = JournalService::new(state.db.clone());

    match service.create_entry(current_user.0.user_id, input).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a journal entry
pub async fn update_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(entry_id): Path<Uuid>,
    Json(input): Json<UpdateJournalEntryInput>,
) -> impl IntoResponse {
    let service = JournalService::new(state.db.clone());

    match service
        .update_entry(current_user.0.user_id, entry_id, input)
        .await
    {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a journal entry
pub async fn delete_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = JournalService::new(state.db.clone());

    match service.delete_entry(current_user.0.user_id, entry_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
