//! PostgreSQL-backed `PackageSizeCatalog` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::SizeTier;
use crate::domain::ports::{PackageSizeCatalog, PackageSizeCatalogError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ACTIVE, PackageSizeRow};
use super::pool::{DbPool, PoolError};
use super::schema::package_sizes;

/// Diesel-backed package-size catalog.
///
/// The smallest covering tier is chosen in SQL: ascending `limit_value`,
/// then ascending `id` so equal thresholds keep catalog order.
#[derive(Clone)]
pub struct DieselPackageSizeCatalog {
    pool: DbPool,
}

impl DieselPackageSizeCatalog {
    /// Create a catalog over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PackageSizeCatalogError {
    map_basic_pool_error(error, PackageSizeCatalogError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PackageSizeCatalogError {
    map_basic_diesel_error(
        error,
        PackageSizeCatalogError::query,
        PackageSizeCatalogError::connection,
    )
}

fn row_to_tier(row: PackageSizeRow) -> Result<SizeTier, PackageSizeCatalogError> {
    let threshold = u32::try_from(row.limit_value).map_err(|_| {
        PackageSizeCatalogError::query(format!(
            "package size {} has negative limit {}",
            row.id, row.limit_value
        ))
    })?;
    Ok(SizeTier {
        code: row.id,
        nickname: row.nickname,
        threshold,
    })
}

#[async_trait]
impl PackageSizeCatalog for DieselPackageSizeCatalog {
    async fn lookup_tier_by_weight(
        &self,
        weight: u32,
    ) -> Result<Option<SizeTier>, PackageSizeCatalogError> {
        // Weights beyond the column range cannot be covered by any tier.
        let Ok(bound) = i32::try_from(weight) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = package_sizes::table
            .filter(package_sizes::record_status.eq(ACTIVE))
            .filter(package_sizes::limit_value.ge(bound))
            .order((package_sizes::limit_value.asc(), package_sizes::id.asc()))
            .select(PackageSizeRow::as_select())
            .first::<PackageSizeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_tier).transpose()
    }
}
