use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::villa_numbers::model::VillaNumber;
use crate::features::villas::model::Villa;
use crate::shared::store::{EntityStore, Pagination};

const VILLA_NUMBER_COLUMNS: &str = "villa_no, villa_id, special_details, created_at, updated_at";

/// Explicit predicate over villa number rows; unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct VillaNumberFilter {
    pub villa_no: Option<i64>,
    pub villa_id: Option<i64>,
}

impl VillaNumberFilter {
    pub fn by_villa_no(villa_no: i64) -> Self {
        Self {
            villa_no: Some(villa_no),
            ..Default::default()
        }
    }
}

fn apply_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a VillaNumberFilter) {
    let mut prefix = " WHERE ";
    if let Some(villa_no) = filter.villa_no {
        qb.push(prefix).push("villa_no = ").push_bind(villa_no);
        prefix = " AND ";
    }
    if let Some(villa_id) = filter.villa_id {
        qb.push(prefix).push("villa_id = ").push_bind(villa_id);
    }
}

/// Store access for villa numbers
pub struct VillaNumberRepository {
    pool: SqlitePool,
}

impl VillaNumberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace the entity, stamping `updated_at` before the write.
    pub async fn update(&self, mut villa_number: VillaNumber) -> Result<VillaNumber> {
        villa_number.updated_at = Utc::now();

        sqlx::query(
            "UPDATE villa_numbers \
             SET villa_id = ?, special_details = ?, updated_at = ? \
             WHERE villa_no = ?",
        )
        .bind(villa_number.villa_id)
        .bind(&villa_number.special_details)
        .bind(villa_number.updated_at)
        .bind(villa_number.villa_no)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to update villa number {}: {:?}",
                villa_number.villa_no,
                e
            );
            AppError::Database(e)
        })?;

        Ok(villa_number)
    }

    /// Attaches parent villas to the loaded rows with a single batched query.
    async fn attach_villas(&self, villa_numbers: &mut [VillaNumber]) -> Result<()> {
        if villa_numbers.is_empty() {
            return Ok(());
        }

        let mut ids: Vec<i64> = villa_numbers.iter().map(|vn| vn.villa_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut qb = QueryBuilder::new(
            "SELECT id, name, details, rate, sqft, occupancy, image_url, amenity, \
                    created_at, updated_at \
             FROM villas WHERE id IN (",
        );
        let mut separated = qb.separated(", ");
        for id in &ids {
            separated.push_bind(*id);
        }
        qb.push(")");

        let villas = qb
            .build_query_as::<Villa>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load parent villas: {:?}", e);
                AppError::Database(e)
            })?;

        let by_id: HashMap<i64, Villa> = villas.into_iter().map(|v| (v.id, v)).collect();
        for vn in villa_numbers.iter_mut() {
            vn.villa = by_id.get(&vn.villa_id).cloned();
        }

        Ok(())
    }
}

#[async_trait]
impl EntityStore<VillaNumber> for VillaNumberRepository {
    type Filter = VillaNumberFilter;

    async fn create(&self, villa_number: VillaNumber) -> Result<VillaNumber> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, VillaNumber>(
            "INSERT INTO villa_numbers \
                 (villa_no, villa_id, special_details, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING villa_no, villa_id, special_details, created_at, updated_at",
        )
        .bind(villa_number.villa_no)
        .bind(villa_number.villa_id)
        .bind(&villa_number.special_details)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create villa number: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Villa number created: villa_no={}, villa_id={}",
            created.villa_no,
            created.villa_id
        );
        Ok(created)
    }

    async fn get_all(
        &self,
        filter: Option<&VillaNumberFilter>,
        page: Pagination,
        include_related: Option<&str>,
    ) -> Result<Vec<VillaNumber>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM villa_numbers",
            VILLA_NUMBER_COLUMNS
        ));
        if let Some(filter) = filter {
            apply_filter(&mut qb, filter);
        }
        qb.push(" ORDER BY villa_no");
        if let Some((limit, offset)) = page.limit_offset() {
            qb.push(" LIMIT ")
                .push_bind(limit)
                .push(" OFFSET ")
                .push_bind(offset);
        }

        let mut villa_numbers = qb
            .build_query_as::<VillaNumber>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list villa numbers: {:?}", e);
                AppError::Database(e)
            })?;

        if include_related == Some("Villa") {
            self.attach_villas(&mut villa_numbers).await?;
        }

        Ok(villa_numbers)
    }

    async fn get(
        &self,
        filter: &VillaNumberFilter,
        include_related: Option<&str>,
    ) -> Result<Option<VillaNumber>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM villa_numbers",
            VILLA_NUMBER_COLUMNS
        ));
        apply_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        let villa_number = qb
            .build_query_as::<VillaNumber>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get villa number: {:?}", e);
                AppError::Database(e)
            })?;

        match villa_number {
            Some(vn) if include_related == Some("Villa") => {
                let mut batch = [vn];
                self.attach_villas(&mut batch).await?;
                let [vn] = batch;
                Ok(Some(vn))
            }
            other => Ok(other),
        }
    }

    async fn remove(&self, villa_number: &VillaNumber) -> Result<()> {
        sqlx::query("DELETE FROM villa_numbers WHERE villa_no = ?")
            .bind(villa_number.villa_no)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to delete villa number {}: {:?}",
                    villa_number.villa_no,
                    e
                );
                AppError::Database(e)
            })?;

        Ok(())
    }
}
