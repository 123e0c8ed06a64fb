use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a villa listing
#[derive(Debug, Clone, FromRow)]
pub struct Villa {
    pub id: i64,
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub sqft: i64,
    pub occupancy: i64,
    pub image_url: String,
    pub amenity: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
