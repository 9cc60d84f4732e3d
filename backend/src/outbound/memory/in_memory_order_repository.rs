//! Process-local `OrderRepository`.
//!
//! Identifiers are assigned from a counter starting at one. Every operation
//! holds the map lock for its whole duration, so each is atomic per order.
//! Inactive orders stay in the map but are invisible to reads and updates.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{NewOrder, Order, OrderId, OrderUpdate};

#[derive(Default)]
struct Orders {
    next_id: i64,
    rows: BTreeMap<i64, Order>,
}

/// Mutex-guarded order map.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    state: Mutex<Orders>,
}

impl InMemoryOrderRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Orders>, OrderRepositoryError> {
        self.state
            .lock()
            .map_err(|_| OrderRepositoryError::connection("order map poisoned"))
    }

    /// Soft-delete an order. Returns `false` when no active order matched.
    #[cfg(any(test, feature = "test-support"))]
    pub fn deactivate(&self, id: OrderId) -> Result<bool, OrderRepositoryError> {
        let mut state = self.lock()?;
        let Some(order) = state
            .rows
            .get_mut(&id.value())
            .filter(|order| order.audit.record_status.is_active())
        else {
            return Ok(false);
        };
        order.audit.record_status = crate::domain::RecordStatus::Inactive;
        Ok(true)
    }
}

impl Orders {
    fn active(&self, id: OrderId) -> Option<&Order> {
        self.rows
            .get(&id.value())
            .filter(|order| order.audit.record_status.is_active())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(self.lock()?.active(id).cloned())
    }

    async fn get_by_id_and_sender(
        &self,
        id: OrderId,
        sender_id: &str,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(self
            .lock()?
            .active(id)
            .filter(|order| order.sender.id == sender_id)
            .cloned())
    }

    async fn insert(&self, order: &NewOrder) -> Result<OrderId, OrderRepositoryError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let id = OrderId::new(state.next_id);
        state.rows.insert(id.value(), order.clone().into_order(id));
        Ok(id)
    }

    async fn update(
        &self,
        id: OrderId,
        update: &OrderUpdate,
    ) -> Result<bool, OrderRepositoryError> {
        let mut state = self.lock()?;
        let Some(current) = state.active(id).cloned() else {
            return Ok(false);
        };
        state
            .rows
            .insert(id.value(), current.with_update(update.clone()));
        Ok(true)
    }
}
