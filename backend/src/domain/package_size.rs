//! Package-size tiers and weight resolution.

use serde::{Deserialize, Serialize};

/// One row of the package-size catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeTier {
    /// Catalog identifier of the tier.
    pub code: i32,
    /// Tier nickname compared against the declared package size.
    pub nickname: String,
    /// Largest weight the tier accepts.
    pub threshold: u32,
}

/// Resolve the tier for `weight` from an unordered catalog.
///
/// Tiers are scanned in ascending threshold order and the first whose
/// threshold is at least `weight` wins. Equal thresholds keep catalog order.
///
/// # Examples
/// ```
/// use delivery_service::domain::{SizeTier, resolve_tier};
///
/// let catalog = vec![
///     SizeTier { code: 3, nickname: "L".into(), threshold: 30 },
///     SizeTier { code: 1, nickname: "S".into(), threshold: 5 },
///     SizeTier { code: 2, nickname: "M".into(), threshold: 15 },
/// ];
/// assert_eq!(resolve_tier(&catalog, 20).map(|t| t.nickname.as_str()), Some("L"));
/// assert!(resolve_tier(&catalog, 31).is_none());
/// ```
#[must_use]
pub fn resolve_tier(tiers: &[SizeTier], weight: u32) -> Option<&SizeTier> {
    let mut ordered: Vec<&SizeTier> = tiers.iter().collect();
    ordered.sort_by_key(|tier| tier.threshold);
    ordered.into_iter().find(|tier| tier.threshold >= weight)
}
