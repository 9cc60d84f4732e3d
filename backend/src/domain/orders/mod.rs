//! Shipping order domain types.
//!
//! An order is created from an [`OrderDraft`] once the draft passes field
//! validation, then only its status and update audit fields change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod status;
mod validation;

pub use status::{OrderStatus, ParseOrderStatusError};
pub use validation::{
    FieldViolation, LocationDraft, OrderDraft, PackageDraft, PartyDraft, ValidatedOrder,
};

/// Repository-assigned order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of package size tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PackageSize {
    /// Small parcels.
    #[serde(rename = "S")]
    Small,
    /// Medium parcels.
    #[serde(rename = "M")]
    Medium,
    /// Large parcels.
    #[serde(rename = "L")]
    Large,
}

impl PackageSize {
    /// Single-letter tier code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }

    /// Parse a tier code; codes are case-sensitive.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Small),
            "M" => Some(Self::Medium),
            "L" => Some(Self::Large),
            _ => None,
        }
    }
}

impl fmt::Display for PackageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Sender or recipient of a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Caller-supplied party identifier (document number or account id).
    pub id: String,
    /// Full name.
    pub full_name: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
}

/// Pickup or drop-off point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Decimal latitude as supplied by the caller.
    pub latitude: String,
    /// Decimal longitude as supplied by the caller.
    pub longitude: String,
    /// Street address.
    pub address: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub zip: String,
    /// Free-text directions.
    pub reference: String,
}

/// Package being shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Declared size tier.
    pub size: PackageSize,
    /// Number of items.
    pub quantity: u32,
    /// Weight in catalog units.
    pub weight: u32,
}

/// Soft-delete marker; inactive orders behave as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RecordStatus {
    /// Live record.
    #[default]
    #[serde(rename = "A")]
    Active,
    /// Soft-deleted record.
    #[serde(rename = "I")]
    Inactive,
}

impl RecordStatus {
    /// Single-letter storage code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Active => "A",
            Self::Inactive => "I",
        }
    }

    /// Parse a storage code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Active),
            "I" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Whether the record is live.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Creation and last-update stamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrail {
    /// Actor that created the order.
    pub created_by: String,
    /// Server time at creation.
    pub created_at: DateTime<Utc>,
    /// Actor behind the latest mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Server time of the latest mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker.
    pub record_status: RecordStatus,
}

/// A persisted shipping order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Identifier.
    pub id: OrderId,
    /// Sender.
    pub sender: Party,
    /// Recipient.
    pub recipient: Party,
    /// Pickup point.
    pub origin: Location,
    /// Drop-off point.
    pub destination: Location,
    /// Package details.
    pub package: Package,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Audit stamps.
    pub audit: AuditTrail,
}

impl Order {
    /// Return the order with `update` applied.
    #[must_use]
    pub fn with_update(mut self, update: OrderUpdate) -> Self {
        let OrderUpdate {
            status,
            updated_by,
            updated_at,
        } = update;
        self.status = status;
        self.audit.updated_by = Some(updated_by);
        self.audit.updated_at = Some(updated_at);
        self
    }
}

/// Order awaiting insertion; the repository assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Sender.
    pub sender: Party,
    /// Recipient.
    pub recipient: Party,
    /// Pickup point.
    pub origin: Location,
    /// Drop-off point.
    pub destination: Location,
    /// Package details.
    pub package: Package,
    /// Actor creating the order.
    pub created_by: String,
    /// Server time at creation.
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Stamp a validated order for insertion.
    #[must_use]
    pub fn from_validated(
        order: ValidatedOrder,
        created_by: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ValidatedOrder {
            sender,
            recipient,
            origin,
            destination,
            package,
        } = order;
        Self {
            sender,
            recipient,
            origin,
            destination,
            package,
            created_by: created_by.into(),
            created_at,
        }
    }

    /// Materialise the order under the identifier assigned on insert.
    #[must_use]
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            sender: self.sender,
            recipient: self.recipient,
            origin: self.origin,
            destination: self.destination,
            package: self.package,
            status: OrderStatus::Created,
            audit: AuditTrail {
                created_by: self.created_by,
                created_at: self.created_at,
                updated_by: None,
                updated_at: None,
                record_status: RecordStatus::Active,
            },
        }
    }
}

/// Partial update persisted on every status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpdate {
    /// New status.
    pub status: OrderStatus,
    /// Acting user.
    pub updated_by: String,
    /// Server time of the change.
    pub updated_at: DateTime<Utc>,
}
