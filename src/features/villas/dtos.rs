use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::villas::model::Villa;

/// Response DTO for a villa
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillaDto {
    pub id: i64,
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub sqft: i64,
    pub occupancy: i64,
    pub image_url: String,
    pub amenity: String,
}

impl From<Villa> for VillaDto {
    fn from(v: Villa) -> Self {
        Self {
            id: v.id,
            name: v.name,
            details: v.details,
            rate: v.rate,
            sqft: v.sqft,
            occupancy: v.occupancy,
            image_url: v.image_url,
            amenity: v.amenity,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillaCreateDto {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub sqft: i64,
    #[serde(default)]
    pub occupancy: i64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub amenity: String,
}

/// Updatable-field view of a villa; also the document PATCH operations are
/// applied against.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillaUpdateDto {
    pub id: i64,
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub sqft: i64,
    #[serde(default)]
    pub occupancy: i64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub amenity: String,
}

impl From<&Villa> for VillaUpdateDto {
    fn from(v: &Villa) -> Self {
        Self {
            id: v.id,
            name: v.name.clone(),
            details: v.details.clone(),
            rate: v.rate,
            sqft: v.sqft,
            occupancy: v.occupancy,
            image_url: v.image_url.clone(),
            amenity: v.amenity.clone(),
        }
    }
}

fn default_page_number() -> i64 {
    1
}

/// Query params for listing villas
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListVillasQuery {
    /// Equality filter on occupancy, pushed down to the store when > 0
    pub filter_occupancy: Option<i64>,
    /// Case-insensitive substring filter on name, applied after retrieval
    pub filter_name: Option<String>,
    /// Items per page; 0 or negative returns everything
    #[serde(default)]
    pub page_size: i64,
    /// 1-based page number
    #[serde(default = "default_page_number")]
    pub page_number: i64,
}
