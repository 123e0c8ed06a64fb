use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{LoginRequestDto, LoginResponseDto, RegisterRequestDto, UserDto};
use crate::features::users::repository::UserRepository;
use crate::shared::types::ApiResponse;

/// Authenticate and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/Users/Login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login succeeded", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Bad credentials")
    ),
    tag = "Users"
)]
pub async fn login(
    State(repo): State<Arc<UserRepository>>,
    Json(request): Json<LoginRequestDto>,
) -> Result<Response> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = repo.login(&request).await?;
    if response.is_denied() {
        return Err(AppError::BadRequest(
            "Username or password incorrect.".to_string(),
        ));
    }

    Ok(ApiResponse::ok(StatusCode::OK, response).into_response())
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/Users/Register",
    request_body = RegisterRequestDto,
    responses(
        (status = 200, description = "Account created", body = ApiResponse<UserDto>),
        (status = 400, description = "Username already taken or invalid input")
    ),
    tag = "Users"
)]
pub async fn register(
    State(repo): State<Arc<UserRepository>>,
    Json(request): Json<RegisterRequestDto>,
) -> Result<Response> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !repo.is_unique_user(&request.user_name).await? {
        return Err(AppError::BadRequest("Username already exists.".to_string()));
    }

    let user = repo.register(&request).await?;

    Ok(ApiResponse::ok(StatusCode::OK, user).into_response())
}
