//! Driving port for order reads.

use async_trait::async_trait;

use crate::domain::{Error, Order, OrderId};

/// Read-only order lookups.
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Fetch an active order, optionally requiring a matching sender.
    ///
    /// Absence is `Ok(None)`; `Err` is reserved for infrastructure failures.
    async fn get(&self, id: OrderId, sender_id: Option<&str>) -> Result<Option<Order>, Error>;
}
