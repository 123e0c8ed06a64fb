use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::users::model::{AuthenticatedUser, Claims, User};

/// Issues and validates HS256 bearer tokens for local accounts.
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issues a signed token for the user with a fixed expiry window.
    pub fn issue(&self, user: &User) -> Result<String> {
        let expires_at = Utc::now() + Duration::minutes(self.config.token_expiry_minutes);
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            role: user.role.clone(),
            exp: expires_at.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!("Failed to sign token: {:?}", e);
            AppError::Internal("Failed to issue token".to_string())
        })
    }

    /// Validates signature and expiry, returning the request identity.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            tracing::debug!("Token rejected: {:?}", e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(AuthenticatedUser::from(data.claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(secret: &str, expiry_minutes: i64) -> AuthConfig {
        AuthConfig {
            secret: secret.to_string(),
            token_expiry_minutes: expiry_minutes,
        }
    }

    fn test_user() -> User {
        User {
            id: 7,
            user_name: "alice".to_string(),
            name: "Alice".to_string(),
            password_hash: String::new(),
            role: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let service = TokenService::new(test_config("a-secret-of-decent-length", 15));

        let token = service.issue(&test_user()).unwrap();
        let user = service.validate(&token).unwrap();

        assert_eq!(user.sub, "7");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.role, "admin");
        assert!(user.is_admin());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenService::new(test_config("a-secret-of-decent-length", 15));
        let verifier = TokenService::new(test_config("a-different-secret-here", 15));

        let token = issuer.issue(&test_user()).unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = TokenService::new(test_config("a-secret-of-decent-length", -5));

        let token = service.issue(&test_user()).unwrap();
        assert!(service.validate(&token).is_err());
    }
}
