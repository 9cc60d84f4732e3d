//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them into
//! domain values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::RecordStatus;

use super::schema::{orders, package_sizes, users};

/// Soft-delete marker for rows that are live.
pub(crate) const ACTIVE: &str = RecordStatus::Active.code();

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i64,
    pub sender_id: String,
    pub sender_full_name: String,
    pub sender_phone: String,
    pub sender_email: String,
    pub recipient_id: String,
    pub recipient_full_name: String,
    pub recipient_phone: String,
    pub recipient_email: String,
    pub origin_latitude: String,
    pub origin_longitude: String,
    pub origin_address: String,
    pub origin_country: String,
    pub origin_zip: String,
    pub origin_reference: String,
    pub destination_latitude: String,
    pub destination_longitude: String,
    pub destination_address: String,
    pub destination_country: String,
    pub destination_zip: String,
    pub destination_reference: String,
    pub package_size: String,
    pub package_quantity: i32,
    pub package_weight: i32,
    pub status: String,
    pub record_status: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insertable struct for new orders.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub sender_id: &'a str,
    pub sender_full_name: &'a str,
    pub sender_phone: &'a str,
    pub sender_email: &'a str,
    pub recipient_id: &'a str,
    pub recipient_full_name: &'a str,
    pub recipient_phone: &'a str,
    pub recipient_email: &'a str,
    pub origin_latitude: &'a str,
    pub origin_longitude: &'a str,
    pub origin_address: &'a str,
    pub origin_country: &'a str,
    pub origin_zip: &'a str,
    pub origin_reference: &'a str,
    pub destination_latitude: &'a str,
    pub destination_longitude: &'a str,
    pub destination_address: &'a str,
    pub destination_country: &'a str,
    pub destination_zip: &'a str,
    pub destination_reference: &'a str,
    pub package_size: &'a str,
    pub package_quantity: i32,
    pub package_weight: i32,
    pub status: &'a str,
    pub record_status: &'a str,
    pub created_by: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset applied on every status change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
pub(crate) struct OrderStatusChange<'a> {
    pub status: &'a str,
    pub updated_by: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading package-size tiers.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = package_sizes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PackageSizeRow {
    pub id: i32,
    pub nickname: String,
    pub limit_value: i32,
}

/// Row struct for reading user accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub application: String,
    pub password_hash: String,
}

/// Insertable struct for provisioning accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub application: &'a str,
    pub password_hash: &'a str,
    pub record_status: &'a str,
    pub created_by: &'a str,
}
