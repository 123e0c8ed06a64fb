use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{LoginRequestDto, LoginResponseDto, RegisterRequestDto, UserDto};
use crate::features::users::model::User;
use crate::features::users::token_service::TokenService;

/// Account storage plus the login/register flows built on it.
pub struct UserRepository {
    pool: SqlitePool,
    tokens: Arc<TokenService>,
}

impl UserRepository {
    pub fn new(pool: SqlitePool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// True when no account holds the username yet.
    pub async fn is_unique_user(&self, user_name: &str) -> Result<bool> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE user_name = ?")
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check username uniqueness: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(existing.is_none())
    }

    /// Verifies credentials and issues a token. Unknown usernames and wrong
    /// passwords produce the same denied response so callers cannot probe for
    /// accounts.
    pub async fn login(&self, request: &LoginRequestDto) -> Result<LoginResponseDto> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, user_name, name, password_hash, role, created_at \
             FROM users WHERE user_name = ?",
        )
        .bind(&request.user_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user: {:?}", e);
            AppError::Database(e)
        })?;

        let user = match user {
            Some(u) => u,
            None => return Ok(LoginResponseDto::denied()),
        };

        let verified = bcrypt::verify(&request.password, &user.password_hash).unwrap_or(false);
        if !verified {
            return Ok(LoginResponseDto::denied());
        }

        let token = self.tokens.issue(&user)?;
        let role = user.role.clone();

        Ok(LoginResponseDto {
            user: Some(UserDto::from(user)),
            token,
            role: Some(role),
        })
    }

    /// Creates an account with a bcrypt-hashed password, provisioning the
    /// role table lazily on first use.
    pub async fn register(&self, request: &RegisterRequestDto) -> Result<UserDto> {
        let role = request
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or("customer")
            .to_lowercase();

        self.ensure_role_exists(&role).await?;

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST).map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            AppError::Internal("Failed to hash password".to_string())
        })?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (user_name, name, password_hash, role, created_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, user_name, name, password_hash, role, created_at",
        )
        .bind(&request.user_name)
        .bind(&request.name)
        .bind(&password_hash)
        .bind(&role)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("User registered: id={}, role={}", user.id, user.role);
        Ok(UserDto::from(user))
    }

    async fn ensure_role_exists(&self, role: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO roles (name) VALUES ('admin'), ('customer'), (?)")
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to provision roles: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}
