use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::villas::model::Villa;
use crate::shared::store::{EntityStore, Pagination};

const VILLA_COLUMNS: &str =
    "id, name, details, rate, sqft, occupancy, image_url, amenity, created_at, updated_at";

/// Explicit predicate over villa rows; unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct VillaFilter {
    pub id: Option<i64>,
    pub name_ci: Option<String>,
    pub occupancy: Option<i64>,
    /// Excludes one id, for uniqueness checks during updates.
    pub exclude_id: Option<i64>,
}

impl VillaFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_name_ci(name: &str) -> Self {
        Self {
            name_ci: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn by_occupancy(occupancy: i64) -> Self {
        Self {
            occupancy: Some(occupancy),
            ..Default::default()
        }
    }

    pub fn excluding(mut self, id: i64) -> Self {
        self.exclude_id = Some(id);
        self
    }
}

fn apply_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a VillaFilter) {
    let mut prefix = " WHERE ";
    if let Some(id) = filter.id {
        qb.push(prefix).push("id = ").push_bind(id);
        prefix = " AND ";
    }
    if let Some(name) = &filter.name_ci {
        qb.push(prefix)
            .push("LOWER(name) = LOWER(")
            .push_bind(name)
            .push(")");
        prefix = " AND ";
    }
    if let Some(occupancy) = filter.occupancy {
        qb.push(prefix).push("occupancy = ").push_bind(occupancy);
        prefix = " AND ";
    }
    if let Some(id) = filter.exclude_id {
        qb.push(prefix).push("id <> ").push_bind(id);
    }
}

/// Store access for villa listings
pub struct VillaRepository {
    pool: SqlitePool,
}

impl VillaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace the entity, stamping `updated_at` before the write.
    pub async fn update(&self, mut villa: Villa) -> Result<Villa> {
        villa.updated_at = Utc::now();

        sqlx::query(
            "UPDATE villas \
             SET name = ?, details = ?, rate = ?, sqft = ?, occupancy = ?, \
                 image_url = ?, amenity = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&villa.name)
        .bind(&villa.details)
        .bind(villa.rate)
        .bind(villa.sqft)
        .bind(villa.occupancy)
        .bind(&villa.image_url)
        .bind(&villa.amenity)
        .bind(villa.updated_at)
        .bind(villa.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update villa {}: {:?}", villa.id, e);
            AppError::Database(e)
        })?;

        Ok(villa)
    }
}

#[async_trait]
impl EntityStore<Villa> for VillaRepository {
    type Filter = VillaFilter;

    async fn create(&self, villa: Villa) -> Result<Villa> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, Villa>(
            "INSERT INTO villas \
                 (name, details, rate, sqft, occupancy, image_url, amenity, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, name, details, rate, sqft, occupancy, image_url, amenity, \
                       created_at, updated_at",
        )
        .bind(&villa.name)
        .bind(&villa.details)
        .bind(villa.rate)
        .bind(villa.sqft)
        .bind(villa.occupancy)
        .bind(&villa.image_url)
        .bind(&villa.amenity)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create villa: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Villa created: id={}, name={}", created.id, created.name);
        Ok(created)
    }

    async fn get_all(
        &self,
        filter: Option<&VillaFilter>,
        page: Pagination,
        _include_related: Option<&str>,
    ) -> Result<Vec<Villa>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM villas", VILLA_COLUMNS));
        if let Some(filter) = filter {
            apply_filter(&mut qb, filter);
        }
        qb.push(" ORDER BY id");
        if let Some((limit, offset)) = page.limit_offset() {
            qb.push(" LIMIT ")
                .push_bind(limit)
                .push(" OFFSET ")
                .push_bind(offset);
        }

        qb.build_query_as::<Villa>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list villas: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get(
        &self,
        filter: &VillaFilter,
        _include_related: Option<&str>,
    ) -> Result<Option<Villa>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM villas", VILLA_COLUMNS));
        apply_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        qb.build_query_as::<Villa>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get villa: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn remove(&self, villa: &Villa) -> Result<()> {
        sqlx::query("DELETE FROM villas WHERE id = ?")
            .bind(villa.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete villa {}: {:?}", villa.id, e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}
