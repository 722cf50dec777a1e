//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::auth::{AuthService, AuthSession, SignupInput};
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.db.clone(), &state.config.jwt)
}

/// Signup endpoint handler
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupInput>,
) -> Result<(StatusCode, Json<AuthSession>), AppError> {
    let session = auth_service(&state).signup(body).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthSession>, AppError> {
    let session = auth_service(&state)
        .login(&body.username_or_email, &body.password)
        .await?;
    Ok(Json(session))
}

/// Refresh token endpoint handler
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<AuthSession>, AppError> {
    let session = auth_service(&state).refresh_token(&body.refresh_token).await?;
    Ok(Json(session))
}

/// Logout endpoint handler; revokes the given refresh token
pub async fn logout(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<RefreshRequest>,
) -> Result<StatusCode, AppError> {
    auth_service(&state)
        .logout(current_user.0.user_id, &body.refresh_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current user endpoint handler
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<User>, AppError> {
    let user = auth_service(&state).get_user(current_user.0.user_id).await?;
    Ok(Json(user))
}
