//! Community forum HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::forum::{CreateForumPostInput, ForumService};
use crate::AppState;
use shared::types::Pagination;

/// List forum posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    let service = ForumService::new(state.db.clone());

    match service.list_posts(&pagination).await {
        Ok(posts) => (StatusCode::OK, Json(posts)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a forum post
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ForumService::new(state.db.clone());

    match service.get_post(post_id).await {
        Ok(post) => (StatusCode::OK, Json(post)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a forum post
pub async fn create_post(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateForumPostInput>,
) -> impl IntoResponse {
    let service = ForumService::new(state.db.clone());

    match service.create_post(&current_user.0, input).await {
        Ok(post) => (StatusCode::CREATED, Json(post)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a forum post
pub async fn delete_post(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(post_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ForumService::new(state.db.clone());

    match service.delete_post(&current_user.0, post_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
