//! Authentication service for user signup, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    tokens: TokenIssuer,
}

/// Input for signing up a new user
#[derive(Debug, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Tokens plus the account they were issued for
#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub user: User,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

/// User info from database
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            is_admin: row.is_admin,
            created_at: row.created_at,
        }
    }
}

/// Signs and verifies access tokens; mints opaque refresh tokens
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
        }
    }

    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Generate access and refresh tokens
    pub fn issue(&self, user_id: Uuid, username: &str, is_admin: bool) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let access_exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            is_admin,
            exp: access_exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        // Refresh token (simple random token)
        let refresh_token = Uuid::new_v4().to_string();

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Validate access token and return claims
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
    }

    /// Hash a refresh token for storage
    pub fn hash_refresh_token(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &JwtConfig) -> Self {
        Self {
            db,
            tokens: TokenIssuer::new(config),
        }
    }

    /// Register a new user. The very first account becomes an admin.
    pub async fn signup(&self, input: SignupInput) -> AppResult<AuthSession> {
        input.validate()?;
        shared::validate_username(&input.username)?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($2)",
        )
        .bind(&input.username)
        .bind(&input.email)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "user".to_string(),
                message: "Username or email is already registered".to_string(),
            });
        }

        // Hash password
        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let mut tx = self.db.begin().await?;

        // Serialise concurrent first signups
        sqlx::query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let user_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;
        let is_admin = user_count == 0;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, is_admin, is_active, created_at
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(is_admin)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        tx.commit().await?;

        if is_admin {
            tracing::info!(user_id = %row.id, "First account registered as admin");
        }

        let tokens = self.tokens.issue(row.id, &row.username, row.is_admin)?;
        self.store_refresh_token(row.id, &tokens.refresh_token).await?;

        Ok(AuthSession {
            user: row.into(),
            tokens,
        })
    }

    /// Authenticate with username or email plus password
    pub async fn login(&self, username_or_email: &str, password: &str) -> AppResult<AuthSession> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, is_admin, is_active, created_at
            FROM users
            WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1)
            "#,
        )
        .bind(username_or_email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        let valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(&self.db)
            .await?;

        let tokens = self.tokens.issue(user.id, &user.username, user.is_admin)?;
        self.store_refresh_token(user.id, &tokens.refresh_token).await?;

        Ok(AuthSession {
            user: user.into(),
            tokens,
        })
    }

    /// Rotate a refresh token
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthSession> {
        let token_hash = TokenIssuer::hash_refresh_token(refresh_token);

        // Revoke and fetch in one statement so a token can only be used once
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            WITH revoked AS (
                UPDATE refresh_tokens SET revoked_at = NOW()
                WHERE token_hash = $1
                  AND expires_at > NOW()
                  AND revoked_at IS NULL
                RETURNING user_id
            )
            SELECT u.id, u.username, u.email, u.password_hash, u.is_admin, u.is_active, u.created_at
            FROM users u
            JOIN revoked r ON r.user_id = u.id
            WHERE u.is_active = true
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired refresh token".to_string()))?;

        let tokens = self.tokens.issue(user.id, &user.username, user.is_admin)?;
        self.store_refresh_token(user.id, &tokens.refresh_token).await?;

        Ok(AuthSession {
            user: user.into(),
            tokens,
        })
    }

    /// Revoke a refresh token belonging to the user
    pub async fn logout(&self, user_id: Uuid, refresh_token: &str) -> AppResult<()> {
        let token_hash = TokenIssuer::hash_refresh_token(refresh_token);

        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW() WHERE token_hash = $1 AND user_id = $2 AND revoked_at IS NULL",
        )
        .bind(&token_hash)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Look up the current user
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, is_admin, is_active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(user.into())
    }

    /// Store refresh token in database
    async fn store_refresh_token(&self, user_id: Uuid, token: &str) -> AppResult<()> {
        let token_hash = TokenIssuer::hash_refresh_token(token);
        let expires_at = Utc::now() + Duration::seconds(self.tokens.refresh_token_expiry());

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(&token_hash)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

/// A racing signup can still hit the unique indexes after the pre-check
fn map_unique_violation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict {
            resource: "user".to_string(),
            message: "Username or email is already registered".to_string(),
        },
        _ => AppError::DatabaseError(err),
    }
}
