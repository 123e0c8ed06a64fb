use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::villas::model::Villa;

/// Database model for a bookable unit within a villa. `villa_no` is a
/// client-supplied natural key, not an autoincrement id.
#[derive(Debug, Clone, FromRow)]
pub struct VillaNumber {
    pub villa_no: i64,
    pub villa_id: i64,
    pub special_details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Parent villa, populated only when eager loading is requested.
    #[sqlx(skip)]
    pub villa: Option<Villa>,
}
