use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::model::User;

/// Public view of an account; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub user_name: String,
    pub name: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            user_name: u.user_name,
            name: u.name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestDto {
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login outcome. A failed login serializes with an empty token and no user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub user: Option<UserDto>,
    pub token: String,
    pub role: Option<String>,
}

impl LoginResponseDto {
    pub fn denied() -> Self {
        Self {
            user: None,
            token: String::new(),
            role: None,
        }
    }

    pub fn is_denied(&self) -> bool {
        self.token.is_empty()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Requested role; defaults to "customer" when absent.
    #[serde(default)]
    pub role: Option<String>,
}
