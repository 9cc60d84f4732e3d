//! Port for order persistence.
//!
//! Reads only ever return active records; soft-deleted orders behave as
//! absent. Updates are last-writer-wins keyed by the order identifier.

use async_trait::async_trait;

use crate::domain::{NewOrder, Order, OrderId, OrderUpdate};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "order repository query failed: {message}",
    }
}

/// Durable storage for orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Load an active order by identifier.
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError>;

    /// Load an active order whose sender identifier matches `sender_id`.
    async fn get_by_id_and_sender(
        &self,
        id: OrderId,
        sender_id: &str,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// Insert a new order and return its assigned identifier.
    async fn insert(&self, order: &NewOrder) -> Result<OrderId, OrderRepositoryError>;

    /// Persist the status and update stamps of an active order.
    ///
    /// Returns `false` when no active order matched `id`.
    async fn update(&self, id: OrderId, update: &OrderUpdate)
    -> Result<bool, OrderRepositoryError>;
}
