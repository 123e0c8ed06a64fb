use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::users::guards::{RequireAdmin, RequireUser};
use crate::features::villa_numbers::dtos::{
    VillaNumberCreateDto, VillaNumberDto, VillaNumberUpdateDto,
};
use crate::features::villa_numbers::model::VillaNumber;
use crate::features::villa_numbers::repository::{VillaNumberFilter, VillaNumberRepository};
use crate::features::villas::repository::{VillaFilter, VillaRepository};
use crate::shared::store::{EntityStore, Pagination};
use crate::shared::types::ApiResponse;

/// Handler state for the villa number surface. Villa access is needed to
/// enforce the parent-villa reference at the application level.
#[derive(Clone)]
pub struct VillaNumberApiState {
    pub villa_numbers: Arc<VillaNumberRepository>,
    pub villas: Arc<VillaRepository>,
}

/// List villa numbers with their parent villa attached
#[utoipa::path(
    get,
    path = "/api/v1/VillaNumberAPI",
    responses(
        (status = 200, description = "List of villa numbers", body = ApiResponse<Vec<VillaNumberDto>>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaNumberAPI"
)]
pub async fn list_villa_numbers(
    State(state): State<VillaNumberApiState>,
    RequireUser(_user): RequireUser,
) -> Result<Response> {
    let villa_numbers = state
        .villa_numbers
        .get_all(None, Pagination::none(), Some("Villa"))
        .await?;

    let result: Vec<VillaNumberDto> = villa_numbers.into_iter().map(VillaNumberDto::from).collect();
    Ok(ApiResponse::ok(StatusCode::OK, result).into_response())
}

/// Get a villa number by its number
#[utoipa::path(
    get,
    path = "/api/v1/VillaNumberAPI/{id}",
    params(("id" = i64, Path, description = "Villa number")),
    responses(
        (status = 200, description = "Villa number found", body = ApiResponse<VillaNumberDto>),
        (status = 400, description = "Invalid number"),
        (status = 404, description = "Villa number not found")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaNumberAPI"
)]
pub async fn get_villa_number(
    State(state): State<VillaNumberApiState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Response> {
    if id <= 0 {
        return Err(AppError::BadRequest("Invalid Villa Number.".to_string()));
    }

    let villa_number = state
        .villa_numbers
        .get(&VillaNumberFilter::by_villa_no(id), Some("Villa"))
        .await?
        .ok_or_else(|| AppError::NotFound("Villa Number doesn't exists.".to_string()))?;

    Ok(ApiResponse::ok(StatusCode::OK, VillaNumberDto::from(villa_number)).into_response())
}

/// Create a villa number (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/VillaNumberAPI",
    request_body = VillaNumberCreateDto,
    responses(
        (status = 201, description = "Villa number created", body = ApiResponse<VillaNumberDto>),
        (status = 400, description = "Duplicate number or unknown parent villa"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaNumberAPI"
)]
pub async fn create_villa_number(
    State(state): State<VillaNumberApiState>,
    RequireAdmin(_user): RequireAdmin,
    Json(dto): Json<VillaNumberCreateDto>,
) -> Result<Response> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if state
        .villa_numbers
        .get(&VillaNumberFilter::by_villa_no(dto.villa_no), None)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Villa Number already Exists!".to_string(),
        ));
    }

    if state
        .villas
        .get(&VillaFilter::by_id(dto.villa_id), None)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Villa ID is Invalid!".to_string()));
    }

    let now = Utc::now();
    let villa_number = VillaNumber {
        villa_no: dto.villa_no,
        villa_id: dto.villa_id,
        special_details: dto.special_details,
        created_at: now,
        updated_at: now,
        villa: None,
    };

    let created = state.villa_numbers.create(villa_number).await?;
    let location = format!("/api/v1/VillaNumberAPI/{}", created.villa_no);
    let body = ApiResponse::ok(StatusCode::CREATED, VillaNumberDto::from(created));

    Ok(([(header::LOCATION, location)], body).into_response())
}

/// Replace a villa number (admin only)
#[utoipa::path(
    put,
    path = "/api/v1/VillaNumberAPI/{id}",
    params(("id" = i64, Path, description = "Villa number")),
    request_body = VillaNumberUpdateDto,
    responses(
        (status = 200, description = "Villa number updated", body = ApiResponse<VillaNumberDto>),
        (status = 400, description = "Number mismatch or unknown parent villa"),
        (status = 404, description = "Villa number not found")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaNumberAPI"
)]
pub async fn update_villa_number(
    State(state): State<VillaNumberApiState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
    Json(dto): Json<VillaNumberUpdateDto>,
) -> Result<Response> {
    if id <= 0 || dto.villa_no != id {
        return Err(AppError::BadRequest("Invalid Villa Number.".to_string()));
    }

    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let existing = state
        .villa_numbers
        .get(&VillaNumberFilter::by_villa_no(id), None)
        .await?
        .ok_or_else(|| AppError::NotFound("Villa Number doesn't exists.".to_string()))?;

    if state
        .villas
        .get(&VillaFilter::by_id(dto.villa_id), None)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Villa ID is Invalid!".to_string()));
    }

    let updated = state
        .villa_numbers
        .update(VillaNumber {
            villa_no: existing.villa_no,
            villa_id: dto.villa_id,
            special_details: dto.special_details,
            created_at: existing.created_at,
            updated_at: existing.updated_at,
            villa: None,
        })
        .await?;

    Ok(ApiResponse::ok(StatusCode::OK, VillaNumberDto::from(updated)).into_response())
}

/// Delete a villa number (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/VillaNumberAPI/{id}",
    params(("id" = i64, Path, description = "Villa number")),
    responses(
        (status = 200, description = "Villa number deleted"),
        (status = 400, description = "Invalid number"),
        (status = 404, description = "Villa number not found")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaNumberAPI"
)]
pub async fn delete_villa_number(
    State(state): State<VillaNumberApiState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Response> {
    if id <= 0 {
        return Err(AppError::BadRequest("Invalid Villa Number.".to_string()));
    }

    let villa_number = state
        .villa_numbers
        .get(&VillaNumberFilter::by_villa_no(id), None)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid Villa Number.".to_string()))?;

    state.villa_numbers.remove(&villa_number).await?;

    Ok(ApiResponse::<VillaNumberDto>::success(StatusCode::OK).into_response())
}

/// Placeholder endpoint kept on the v2 surface
#[utoipa::path(
    get,
    path = "/api/v2/VillaNumberAPI/GetString",
    responses((status = 200, description = "Static sample values", body = [String])),
    tag = "VillaNumberAPI"
)]
pub async fn get_string() -> Json<[&'static str; 2]> {
    Json(["value1", "value2"])
}
