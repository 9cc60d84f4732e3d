//! Field validation for order creation payloads.
//!
//! Drafts mirror the wire shape with every field optional or defaulted so a
//! missing value surfaces as a named [`FieldViolation`] rather than a
//! deserialisation failure.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{Location, Package, PackageSize, Party};
use crate::domain::{Error, email};

const TEXT_MAX: usize = 200;
const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Unvalidated sender or recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PartyDraft {
    /// Party identifier.
    pub id: String,
    /// Full name.
    pub full_name: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
}

/// Unvalidated pickup or drop-off point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationDraft {
    /// Decimal latitude.
    #[schema(example = "4.6097")]
    pub latitude: String,
    /// Decimal longitude.
    #[schema(example = "-74.0817")]
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

/// Unvalidated package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageDraft {
    /// Declared size tier code.
    #[schema(example = "M")]
    pub size: String,
    /// Number of items.
    pub quantity: i64,
    /// Weight in catalog units.
    pub weight: i64,
}

/// Order creation payload as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
    /// Sender details.
    pub sender: Option<PartyDraft>,
    /// Recipient details.
    pub recipient: Option<PartyDraft>,
    /// Pickup point.
    pub origin: Option<LocationDraft>,
    /// Drop-off point.
    pub destination: Option<LocationDraft>,
    /// Package details.
    pub package: Option<PackageDraft>,
}

/// First field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted wire path of the field.
    pub field: String,
    /// Machine-readable reason.
    pub code: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            code,
            message: message.into(),
        }
    }
}

impl From<FieldViolation> for Error {
    fn from(value: FieldViolation) -> Self {
        Self::validation_failed(value.message)
            .with_details(json!({ "field": value.field, "code": value.code }))
    }
}

/// Structurally valid order content, not yet checked against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    /// Sender.
    pub sender: Party,
    /// Recipient.
    pub recipient: Party,
    /// Pickup point.
    pub origin: Location,
    /// Drop-off point.
    pub destination: Location,
    /// Package.
    pub package: Package,
}

impl OrderDraft {
    /// Validate every field, reporting the first violation.
    ///
    /// # Examples
    /// ```
    /// use delivery_service::domain::OrderDraft;
    ///
    /// let violation = OrderDraft::default().validate().unwrap_err();
    /// assert_eq!(violation.field, "sender");
    /// assert_eq!(violation.code, "required");
    /// ```
    pub fn validate(self) -> Result<ValidatedOrder, FieldViolation> {
        let Self {
            sender,
            recipient,
            origin,
            destination,
            package,
        } = self;
        Ok(ValidatedOrder {
            sender: validate_party("sender", present("sender", sender)?)?,
            recipient: validate_party("recipient", present("recipient", recipient)?)?,
            origin: validate_location("origin", present("origin", origin)?)?,
            destination: validate_location("destination", present("destination", destination)?)?,
            package: validate_package(present("package", package)?)?,
        })
    }
}

fn present<T>(field: &str, value: Option<T>) -> Result<T, FieldViolation> {
    value.ok_or_else(|| FieldViolation::new(field, "required", format!("{field} is required")))
}

fn text(prefix: &str, name: &str, value: String) -> Result<String, FieldViolation> {
    let field = format!("{prefix}.{name}");
    if value.trim().is_empty() {
        return Err(FieldViolation::new(
            &field,
            "required",
            format!("{field} is required"),
        ));
    }
    if value.chars().count() > TEXT_MAX {
        return Err(FieldViolation::new(
            &field,
            "too_long",
            format!("{field} must be at most {TEXT_MAX} characters"),
        ));
    }
    Ok(value)
}

fn validate_party(prefix: &str, draft: PartyDraft) -> Result<Party, FieldViolation> {
    let id = text(prefix, "id", draft.id)?;
    let full_name = text(prefix, "fullName", draft.full_name)?;
    let phone = text(prefix, "phone", draft.phone)?;
    let email = text(prefix, "email", draft.email)?;
    if !email::is_well_formed(&email) {
        let field = format!("{prefix}.email");
        return Err(FieldViolation::new(
            &field,
            "invalid_email",
            format!("{field} is not a valid email address"),
        ));
    }
    Ok(Party {
        id,
        full_name,
        phone,
        email,
    })
}

fn coordinate(
    prefix: &str,
    name: &str,
    value: String,
    range: &RangeInclusive<f64>,
) -> Result<String, FieldViolation> {
    let checked = text(prefix, name, value)?;
    let in_range = checked
        .trim()
        .parse::<f64>()
        .is_ok_and(|parsed| parsed.is_finite() && range.contains(&parsed));
    if in_range {
        Ok(checked)
    } else {
        let field = format!("{prefix}.{name}");
        Err(FieldViolation::new(
            &field,
            "invalid_coordinate",
            format!("{field} must be a decimal between {} and {}", range.start(), range.end()),
        ))
    }
}

fn validate_location(prefix: &str, draft: LocationDraft) -> Result<Location, FieldViolation> {
    Ok(Location {
        latitude: coordinate(prefix, "latitude", draft.latitude, &LATITUDE_RANGE)?,
        longitude: coordinate(prefix, "longitude", draft.longitude, &LONGITUDE_RANGE)?,
        address: text(prefix, "address", draft.address)?,
        country: text(prefix, "country", draft.country)?,
        zip: text(prefix, "zip", draft.zip)?,
        reference: text(prefix, "reference", draft.reference)?,
    })
}

fn positive(name: &str, value: i64) -> Result<u32, FieldViolation> {
    let field = format!("package.{name}");
    if value <= 0 {
        return Err(FieldViolation::new(
            &field,
            "must_be_positive",
            format!("{field} must be greater than zero"),
        ));
    }
    u32::try_from(value).map_err(|_| {
        FieldViolation::new(&field, "out_of_range", format!("{field} is too large"))
    })
}

fn validate_package(draft: PackageDraft) -> Result<Package, FieldViolation> {
    let size = PackageSize::from_code(&draft.size).ok_or_else(|| {
        FieldViolation::new(
            "package.size",
            "invalid_package_size",
            "package.size must be one of S, M or L",
        )
    })?;
    Ok(Package {
        size,
        quantity: positive("quantity", draft.quantity)?,
        weight: positive("weight", draft.weight)?,
    })
}
