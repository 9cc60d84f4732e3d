//! Driving port for order mutations.
//!
//! Inbound adapters call these use-cases with an already authenticated
//! identity; the identity's username is stamped on audit fields.

use async_trait::async_trait;

use crate::domain::{Error, IdentityContext, Order, OrderDraft, OrderId, OrderStatus};

/// Order lifecycle commands.
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Validate and persist a new order in status `created`.
    async fn create(&self, draft: OrderDraft, actor: &IdentityContext) -> Result<Order, Error>;

    /// Move an order to `target` along the transition graph.
    async fn transition(
        &self,
        id: OrderId,
        target: OrderStatus,
        actor: &IdentityContext,
    ) -> Result<Order, Error>;

    /// Cancel an order, optionally claiming a refund.
    async fn cancel(
        &self,
        id: OrderId,
        refund_requested: bool,
        actor: &IdentityContext,
    ) -> Result<Order, Error>;
}
