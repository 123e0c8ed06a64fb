//! Role-based authorization guards.
//!
//! The auth middleware validates the bearer token and stores the decoded
//! identity in request extensions; these guards read it back and check roles.
//!
//! Roles:
//! - admin: full read/write access to villas and villa numbers
//! - customer: read-only access

use crate::core::error::AppError;
use crate::features::users::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for any authenticated user.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireUser(user): RequireUser) { ... }
/// ```
pub struct RequireUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        Ok(RequireUser(user.clone()))
    }
}

/// Guard for users with the "admin" role.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
