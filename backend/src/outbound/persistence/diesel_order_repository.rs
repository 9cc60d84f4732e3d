//! PostgreSQL-backed `OrderRepository` using Diesel.
//!
//! Orders are stored flattened, one column per party, location and package
//! field. Reads filter on `record_status = 'A'` so soft-deleted rows behave
//! as missing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{
    AuditTrail, Location, NewOrder, Order, OrderId, OrderStatus, OrderUpdate, Package,
    PackageSize, Party, RecordStatus,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ACTIVE, NewOrderRow, OrderRow, OrderStatusChange};
use super::pool::{DbPool, PoolError};
use super::schema::orders;

/// Diesel-backed implementation of the order repository port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrderRepositoryError {
    map_basic_pool_error(error, OrderRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OrderRepositoryError {
    map_basic_diesel_error(
        error,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

fn to_column(value: u32, field: &str) -> Result<i32, OrderRepositoryError> {
    i32::try_from(value)
        .map_err(|_| OrderRepositoryError::query(format!("{field} {value} exceeds column range")))
}

fn from_column(value: i32, id: i64, field: &str) -> Result<u32, OrderRepositoryError> {
    u32::try_from(value).map_err(|_| {
        OrderRepositoryError::query(format!("order {id} has negative {field} {value}"))
    })
}

fn row_to_order(row: OrderRow) -> Result<Order, OrderRepositoryError> {
    let id = row.id;
    let size = PackageSize::from_code(&row.package_size).ok_or_else(|| {
        OrderRepositoryError::query(format!(
            "order {id} has unknown package size '{}'",
            row.package_size
        ))
    })?;
    let status = row
        .status
        .parse::<OrderStatus>()
        .map_err(|err| OrderRepositoryError::query(format!("order {id}: {err}")))?;
    let record_status = RecordStatus::from_code(&row.record_status).ok_or_else(|| {
        OrderRepositoryError::query(format!(
            "order {id} has unknown record status '{}'",
            row.record_status
        ))
    })?;

    Ok(Order {
        id: OrderId::new(id),
        sender: Party {
            id: row.sender_id,
            full_name: row.sender_full_name,
            phone: row.sender_phone,
            email: row.sender_email,
        },
        recipient: Party {
            id: row.recipient_id,
            full_name: row.recipient_full_name,
            phone: row.recipient_phone,
            email: row.recipient_email,
        },
        origin: Location {
            latitude: row.origin_latitude,
            longitude: row.origin_longitude,
            address: row.origin_address,
            country: row.origin_country,
            zip: row.origin_zip,
            reference: row.origin_reference,
        },
        destination: Location {
            latitude: row.destination_latitude,
            longitude: row.destination_longitude,
            address: row.destination_address,
            country: row.destination_country,
            zip: row.destination_zip,
            reference: row.destination_reference,
        },
        package: Package {
            size,
            quantity: from_column(row.package_quantity, id, "quantity")?,
            weight: from_column(row.package_weight, id, "weight")?,
        },
        status,
        audit: AuditTrail {
            created_by: row.created_by,
            created_at: row.created_at,
            updated_by: row.updated_by,
            updated_at: row.updated_at,
            record_status,
        },
    })
}

fn new_order_row(order: &NewOrder) -> Result<NewOrderRow<'_>, OrderRepositoryError> {
    let NewOrder {
        sender,
        recipient,
        origin,
        destination,
        package,
        created_by,
        created_at,
    } = order;
    Ok(NewOrderRow {
        sender_id: &sender.id,
        sender_full_name: &sender.full_name,
        sender_phone: &sender.phone,
        sender_email: &sender.email,
        recipient_id: &recipient.id,
        recipient_full_name: &recipient.full_name,
        recipient_phone: &recipient.phone,
        recipient_email: &recipient.email,
        origin_latitude: &origin.latitude,
        origin_longitude: &origin.longitude,
        origin_address: &origin.address,
        origin_country: &origin.country,
        origin_zip: &origin.zip,
        origin_reference: &origin.reference,
        destination_latitude: &destination.latitude,
        destination_longitude: &destination.longitude,
        destination_address: &destination.address,
        destination_country: &destination.country,
        destination_zip: &destination.zip,
        destination_reference: &destination.reference,
        package_size: package.size.code(),
        package_quantity: to_column(package.quantity, "quantity")?,
        package_weight: to_column(package.weight, "weight")?,
        status: OrderStatus::Created.as_str(),
        record_status: ACTIVE,
        created_by,
        created_at: *created_at,
    })
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = orders::table
            .filter(orders::id.eq(id.value()))
            .filter(orders::record_status.eq(ACTIVE))
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_order).transpose()
    }

    async fn get_by_id_and_sender(
        &self,
        id: OrderId,
        sender_id: &str,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = orders::table
            .filter(orders::id.eq(id.value()))
            .filter(orders::sender_id.eq(sender_id))
            .filter(orders::record_status.eq(ACTIVE))
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_order).transpose()
    }

    async fn insert(&self, order: &NewOrder) -> Result<OrderId, OrderRepositoryError> {
        let row = new_order_row(order)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(orders::table)
            .values(&row)
            .returning(orders::id)
            .get_result::<i64>(&mut conn)
            .await
            .map(OrderId::new)
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: OrderId,
        update: &OrderUpdate,
    ) -> Result<bool, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let change = OrderStatusChange {
            status: update.status.as_str(),
            updated_by: &update.updated_by,
            updated_at: update.updated_at,
        };
        let affected = diesel::update(
            orders::table
                .filter(orders::id.eq(id.value()))
                .filter(orders::record_status.eq(ACTIVE)),
        )
        .set(&change)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
