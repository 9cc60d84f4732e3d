//! Port for the package-size catalog.

use async_trait::async_trait;

use crate::domain::SizeTier;

use super::define_port_error;

define_port_error! {
    /// Errors raised by package-size catalog adapters.
    pub enum PackageSizeCatalogError {
        /// Catalog connection could not be established.
        Connection { message: String } =>
            "package size catalog connection failed: {message}",
        /// Catalog query failed during execution.
        Query { message: String } =>
            "package size catalog query failed: {message}",
    }
}

/// Weight-threshold lookup of size tiers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageSizeCatalog: Send + Sync {
    /// Return the active tier with the smallest threshold at or above
    /// `weight`, ties broken by catalog order, or `None` when no tier
    /// covers the weight.
    async fn lookup_tier_by_weight(
        &self,
        weight: u32,
    ) -> Result<Option<SizeTier>, PackageSizeCatalogError>;
}
