//! Fixed package-size catalog used when no database is configured.

use async_trait::async_trait;

use crate::domain::ports::{PackageSizeCatalog, PackageSizeCatalogError};
use crate::domain::{SizeTier, resolve_tier};

/// Catalog over a fixed list of tiers.
#[derive(Debug, Clone)]
pub struct StaticPackageSizeCatalog {
    tiers: Vec<SizeTier>,
}

impl StaticPackageSizeCatalog {
    /// Catalog over `tiers`, kept in the given order for tie-breaking.
    #[must_use]
    pub const fn new(tiers: Vec<SizeTier>) -> Self {
        Self { tiers }
    }
}

impl Default for StaticPackageSizeCatalog {
    /// The seeded tiers: S up to 5, M up to 15, L up to 30.
    fn default() -> Self {
        let tier = |code: i32, nickname: &str, threshold: u32| SizeTier {
            code,
            nickname: nickname.to_owned(),
            threshold,
        };
        Self::new(vec![tier(1, "S", 5), tier(2, "M", 15), tier(3, "L", 30)])
    }
}

#[async_trait]
impl PackageSizeCatalog for StaticPackageSizeCatalog {
    async fn lookup_tier_by_weight(
        &self,
        weight: u32,
    ) -> Result<Option<SizeTier>, PackageSizeCatalogError> {
        Ok(resolve_tier(&self.tiers, weight).cloned())
    }
}
