//! Authentication middleware
//!
//! Bearer token authentication and the admin guard

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::error::{AppError, ErrorDetail, ErrorResponse};
use crate::AppState;

/// Authenticated user information extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

/// Current standing of the token's account
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
struct AccountStatus {
    is_admin: bool,
    is_active: bool,
}

/// Build the [`AuthUser`] from the stored account, not the token claims.
/// Deleted or disabled accounts lose access immediately.
fn resolve_user(
    user_id: Uuid,
    username: String,
    status: Option<AccountStatus>,
) -> Result<AuthUser, AppError> {
    match status {
        Some(status) if status.is_active => Ok(AuthUser {
            user_id,
            username,
            is_admin: status.is_admin,
        }),
        Some(_) => {
            tracing::debug!(%user_id, %username, "Token for disabled account");
            Err(AppError::InvalidToken)
        }
        None => {
            tracing::debug!(%user_id, %username, "Token for unknown account");
            Err(AppError::InvalidToken)
        }
    }
}

/// Validates the bearer token against the users table and stores the
/// [`AuthUser`] in request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        AppError::Unauthorized("Missing or invalid Authorization header".to_string())
    })?;

    let claims = state.tokens.validate(bearer.token())?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

    let status = sqlx::query_as::<_, AccountStatus>(
        "SELECT is_admin, is_active FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    let user = resolve_user(user_id, claims.username, status)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Rejects non-admin users; must run after [`auth_middleware`]
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin => Ok(next.run(request).await),
        Some(user) => {
            tracing::debug!(
                user_id = %user.user_id,
                username = %user.username,
                "Admin route refused"
            );
            Err(AppError::InsufficientPermissions)
        }
        None => Err(AppError::Unauthorized("Authentication required".to_string())),
    }
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail::new("UNAUTHORIZED", "Authentication required"),
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
