use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::users::guards::{RequireAdmin, RequireUser};
use crate::features::villas::dtos::{ListVillasQuery, VillaCreateDto, VillaDto, VillaUpdateDto};
use crate::features::villas::model::Villa;
use crate::features::villas::repository::{VillaFilter, VillaRepository};
use crate::shared::store::{EntityStore, Pagination};
use crate::shared::types::ApiResponse;

fn villa_from_update(dto: VillaUpdateDto, existing: &Villa) -> Villa {
    Villa {
        id: existing.id,
        name: dto.name,
        details: dto.details,
        rate: dto.rate,
        sqft: dto.sqft,
        occupancy: dto.occupancy,
        image_url: dto.image_url,
        amenity: dto.amenity,
        created_at: existing.created_at,
        updated_at: existing.updated_at,
    }
}

/// List villas with optional occupancy/name filters and pagination
#[utoipa::path(
    get,
    path = "/api/v1/VillaAPI",
    params(ListVillasQuery),
    responses(
        (status = 200, description = "List of villas", body = ApiResponse<Vec<VillaDto>>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaAPI"
)]
pub async fn list_villas(
    State(repo): State<Arc<VillaRepository>>,
    RequireUser(_user): RequireUser,
    Query(query): Query<ListVillasQuery>,
) -> Result<Response> {
    let filter = query
        .filter_occupancy
        .filter(|occupancy| *occupancy > 0)
        .map(VillaFilter::by_occupancy);
    let page = Pagination::new(query.page_size, query.page_number);

    let mut villas = repo.get_all(filter.as_ref(), page, None).await?;

    // Substring match on name is applied in memory, after pagination.
    if let Some(search) = query.filter_name.as_deref().filter(|s| !s.trim().is_empty()) {
        let needle = search.to_lowercase();
        villas.retain(|v| v.name.to_lowercase().contains(&needle));
    }

    let result: Vec<VillaDto> = villas.into_iter().map(VillaDto::from).collect();
    Ok(ApiResponse::ok(StatusCode::OK, result).into_response())
}

/// Get a villa by id
#[utoipa::path(
    get,
    path = "/api/v1/VillaAPI/{id}",
    params(("id" = i64, Path, description = "Villa id")),
    responses(
        (status = 200, description = "Villa found", body = ApiResponse<VillaDto>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Villa not found")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaAPI"
)]
pub async fn get_villa(
    State(repo): State<Arc<VillaRepository>>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Response> {
    if id <= 0 {
        return Err(AppError::BadRequest("Invalid Villa Id.".to_string()));
    }

    let villa = repo
        .get(&VillaFilter::by_id(id), None)
        .await?
        .ok_or_else(|| AppError::NotFound("Villa doesn't exists.".to_string()))?;

    Ok(ApiResponse::ok(StatusCode::OK, VillaDto::from(villa)).into_response())
}

/// Create a villa (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/VillaAPI",
    request_body = VillaCreateDto,
    responses(
        (status = 201, description = "Villa created", body = ApiResponse<VillaDto>),
        (status = 400, description = "Duplicate name or invalid input"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaAPI"
)]
pub async fn create_villa(
    State(repo): State<Arc<VillaRepository>>,
    RequireAdmin(_user): RequireAdmin,
    Json(dto): Json<VillaCreateDto>,
) -> Result<Response> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if repo
        .get(&VillaFilter::by_name_ci(&dto.name), None)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Villa already exists!".to_string()));
    }

    let now = Utc::now();
    let villa = Villa {
        id: 0,
        name: dto.name,
        details: dto.details,
        rate: dto.rate,
        sqft: dto.sqft,
        occupancy: dto.occupancy,
        image_url: dto.image_url,
        amenity: dto.amenity,
        created_at: now,
        updated_at: now,
    };

    let created = repo.create(villa).await?;
    let location = format!("/api/v1/VillaAPI/{}", created.id);
    let body = ApiResponse::ok(StatusCode::CREATED, VillaDto::from(created));

    Ok(([(header::LOCATION, location)], body).into_response())
}

/// Replace a villa (admin only)
#[utoipa::path(
    put,
    path = "/api/v1/VillaAPI/{id}",
    params(("id" = i64, Path, description = "Villa id")),
    request_body = VillaUpdateDto,
    responses(
        (status = 200, description = "Villa updated", body = ApiResponse<VillaDto>),
        (status = 400, description = "Id mismatch or duplicate name"),
        (status = 404, description = "Villa not found")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaAPI"
)]
pub async fn update_villa(
    State(repo): State<Arc<VillaRepository>>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
    Json(dto): Json<VillaUpdateDto>,
) -> Result<Response> {
    if id <= 0 || dto.id != id {
        return Err(AppError::BadRequest("Invalid Villa Id.".to_string()));
    }

    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let existing = repo
        .get(&VillaFilter::by_id(id), None)
        .await?
        .ok_or_else(|| AppError::NotFound("Villa doesn't exists.".to_string()))?;

    // Natural-key check excludes the row being replaced.
    if repo
        .get(&VillaFilter::by_name_ci(&dto.name).excluding(id), None)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Villa already exists!".to_string()));
    }

    let updated = repo.update(villa_from_update(dto, &existing)).await?;

    Ok(ApiResponse::ok(StatusCode::OK, VillaDto::from(updated)).into_response())
}

/// Apply a JSON Patch document to a villa (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/VillaAPI/{id}",
    params(("id" = i64, Path, description = "Villa id")),
    request_body = serde_json::Value,
    responses(
        (status = 204, description = "Villa patched"),
        (status = 400, description = "Invalid patch document"),
        (status = 404, description = "Villa not found")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaAPI"
)]
pub async fn patch_villa(
    State(repo): State<Arc<VillaRepository>>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
    Json(patch): Json<json_patch::Patch>,
) -> Result<Response> {
    if id <= 0 {
        return Err(AppError::BadRequest("Invalid Villa Id.".to_string()));
    }

    let existing = repo
        .get(&VillaFilter::by_id(id), None)
        .await?
        .ok_or_else(|| AppError::NotFound("Villa doesn't exists.".to_string()))?;

    // Patch operations run against the updatable-field view, not the row.
    let view = VillaUpdateDto::from(&existing);
    let mut doc = serde_json::to_value(&view).map_err(|e| AppError::Internal(e.to_string()))?;

    json_patch::patch(&mut doc, &patch)
        .map_err(|e| AppError::BadRequest(format!("Invalid patch document: {}", e)))?;

    let patched: VillaUpdateDto = serde_json::from_value(doc)
        .map_err(|e| AppError::Validation(format!("Patched villa is invalid: {}", e)))?;

    if patched.id != id {
        return Err(AppError::BadRequest("Invalid Villa Id.".to_string()));
    }

    patched
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    repo.update(villa_from_update(patched, &existing)).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Delete a villa (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/VillaAPI/{id}",
    params(("id" = i64, Path, description = "Villa id")),
    responses(
        (status = 200, description = "Villa deleted", body = ApiResponse<VillaDto>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Villa not found")
    ),
    security(("bearer_auth" = [])),
    tag = "VillaAPI"
)]
pub async fn delete_villa(
    State(repo): State<Arc<VillaRepository>>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Response> {
    if id <= 0 {
        return Err(AppError::BadRequest("Invalid Villa Id.".to_string()));
    }

    let villa = repo
        .get(&VillaFilter::by_id(id), None)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid Villa Id.".to_string()))?;

    repo.remove(&villa).await?;

    Ok(ApiResponse::<VillaDto>::success(StatusCode::OK).into_response())
}
