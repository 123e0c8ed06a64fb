use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for a local account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// JWT claims carried by issued tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string
    pub sub: String,
    pub name: String,
    pub role: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

/// Identity attached to the request after token validation
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub name: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            name: "Test".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn role_checks_are_case_insensitive() {
        assert!(user_with_role("admin").is_admin());
        assert!(user_with_role("Admin").is_admin());
        assert!(user_with_role("ADMIN").has_role("admin"));
    }

    #[test]
    fn customers_are_not_admins() {
        assert!(!user_with_role("customer").is_admin());
        assert!(user_with_role("customer").has_role("customer"));
    }
}
