use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::villa_numbers::model::VillaNumber;
use crate::features::villas::dtos::VillaDto;

/// Response DTO for a villa number
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillaNumberDto {
    pub villa_no: i64,
    #[serde(rename = "villaID")]
    pub villa_id: i64,
    pub special_details: String,
    pub villa: Option<VillaDto>,
}

impl From<VillaNumber> for VillaNumberDto {
    fn from(vn: VillaNumber) -> Self {
        Self {
            villa_no: vn.villa_no,
            villa_id: vn.villa_id,
            special_details: vn.special_details,
            villa: vn.villa.map(VillaDto::from),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillaNumberCreateDto {
    pub villa_no: i64,
    #[serde(rename = "villaID")]
    pub villa_id: i64,
    #[serde(default)]
    pub special_details: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillaNumberUpdateDto {
    pub villa_no: i64,
    #[serde(rename = "villaID")]
    pub villa_id: i64,
    #[serde(default)]
    pub special_details: String,
}
