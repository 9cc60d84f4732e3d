//! Order lifecycle service.
//!
//! Implements the [`OrderCommand`] and [`OrderQuery`] driving ports over an
//! [`OrderRepository`] and a [`PackageSizeCatalog`]. Every timestamp comes
//! from the injected clock so the refund window is testable.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    OrderCommand, OrderQuery, OrderRepository, OrderRepositoryError, PackageSizeCatalog,
    PackageSizeCatalogError,
};
use crate::domain::{
    Error, IdentityContext, NewOrder, Order, OrderDraft, OrderId, OrderStatus, OrderUpdate,
};

fn map_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::storage_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::storage_unavailable(format!("order repository error: {message}"))
        }
    }
}

fn map_catalog_error(error: PackageSizeCatalogError) -> Error {
    match error {
        PackageSizeCatalogError::Connection { message } => {
            Error::storage_unavailable(format!("package size catalog unavailable: {message}"))
        }
        PackageSizeCatalogError::Query { message } => {
            Error::storage_unavailable(format!("package size catalog error: {message}"))
        }
    }
}

fn transition_error(from: OrderStatus, to: OrderStatus) -> Error {
    let required = OrderStatus::predecessors_of(to);
    let message = if required.is_empty() {
        format!("an order cannot move to {}", to.label())
    } else {
        let labels: Vec<&str> = required.iter().map(|status| status.label()).collect();
        format!(
            "to make this change the order status must be {}",
            labels.join(" or ")
        )
    };
    let names: Vec<&str> = required.iter().map(|status| status.as_str()).collect();
    Error::invalid_transition(message).with_details(json!({
        "from": from.as_str(),
        "to": to.as_str(),
        "requiredPredecessors": names,
    }))
}

/// Business limits applied on order creation and cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPolicy {
    /// Heaviest package accepted without out-of-band negotiation.
    pub max_package_weight: u32,
    /// Minutes after creation within which a refunded cancel is allowed.
    pub refund_window_minutes: u32,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            max_package_weight: 25,
            refund_window_minutes: 2,
        }
    }
}

/// Order service implementing the order driving ports.
#[derive(Clone)]
pub struct OrderService<R: ?Sized, C: ?Sized> {
    orders: Arc<R>,
    catalog: Arc<C>,
    clock: Arc<dyn Clock>,
    policy: OrderPolicy,
}

impl<R: ?Sized, C: ?Sized> OrderService<R, C> {
    /// Create a service over the order repository and size catalog.
    pub fn new(
        orders: Arc<R>,
        catalog: Arc<C>,
        clock: Arc<dyn Clock>,
        policy: OrderPolicy,
    ) -> Self {
        Self {
            orders,
            catalog,
            clock,
            policy,
        }
    }
}

impl<R, C> OrderService<R, C>
where
    R: OrderRepository + ?Sized,
    C: PackageSizeCatalog + ?Sized,
{
    async fn load(&self, id: OrderId) -> Result<Order, Error> {
        self.orders
            .get_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("order {id} does not exist")))
    }

    async fn apply(
        &self,
        order: Order,
        status: OrderStatus,
        actor: &IdentityContext,
    ) -> Result<Order, Error> {
        let update = OrderUpdate {
            status,
            updated_by: actor.actor().to_owned(),
            updated_at: self.clock.utc(),
        };
        let updated = self
            .orders
            .update(order.id, &update)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found(format!("order {} does not exist", order.id)));
        }
        info!(
            order_id = %order.id,
            from = order.status.as_str(),
            to = status.as_str(),
            actor = actor.actor(),
            "order status changed"
        );
        Ok(order.with_update(update))
    }
}

#[async_trait]
impl<R, C> OrderCommand for OrderService<R, C>
where
    R: OrderRepository + ?Sized,
    C: PackageSizeCatalog + ?Sized,
{
    async fn create(&self, draft: OrderDraft, actor: &IdentityContext) -> Result<Order, Error> {
        let validated = draft.validate()?;
        let package = validated.package;

        let ceiling = self.policy.max_package_weight;
        if package.weight > ceiling {
            return Err(Error::oversize_reject(format!(
                "packages heavier than {ceiling} must be arranged with an operator"
            ))
            .with_details(json!({ "weight": package.weight, "ceiling": ceiling })));
        }

        let tier = self
            .catalog
            .lookup_tier_by_weight(package.weight)
            .await
            .map_err(map_catalog_error)?;
        let declared = package.size.code();
        match tier {
            Some(resolved) if resolved.nickname == declared => {}
            Some(resolved) => {
                return Err(Error::size_mismatch(format!(
                    "a package of weight {} is size {}, not {declared}",
                    package.weight, resolved.nickname
                ))
                .with_details(json!({ "declared": declared, "resolved": resolved.nickname })));
            }
            None => {
                return Err(Error::size_mismatch(format!(
                    "no package size accepts weight {}",
                    package.weight
                ))
                .with_details(json!({ "declared": declared, "resolved": null })));
            }
        }

        let new_order = NewOrder::from_validated(validated, actor.actor(), self.clock.utc());
        let id = self
            .orders
            .insert(&new_order)
            .await
            .map_err(map_repository_error)?;
        info!(order_id = %id, actor = actor.actor(), "order created");
        Ok(new_order.into_order(id))
    }

    async fn transition(
        &self,
        id: OrderId,
        target: OrderStatus,
        actor: &IdentityContext,
    ) -> Result<Order, Error> {
        let order = self.load(id).await?;
        if !order.status.can_transition_to(target) {
            return Err(transition_error(order.status, target));
        }
        self.apply(order, target, actor).await
    }

    async fn cancel(
        &self,
        id: OrderId,
        refund_requested: bool,
        actor: &IdentityContext,
    ) -> Result<Order, Error> {
        let order = self.load(id).await?;
        if !order.status.can_transition_to(OrderStatus::Cancelled) {
            return Err(Error::terminal_state(format!(
                "an order that is {} can no longer be cancelled",
                order.status.label()
            ))
            .with_details(json!({ "status": order.status.as_str() })));
        }

        if refund_requested {
            let window = self.policy.refund_window_minutes;
            let elapsed = (self.clock.utc() - order.audit.created_at).num_minutes();
            if elapsed > i64::from(window) {
                return Err(Error::refund_window_expired(format!(
                    "cancellation with refund only applies within {window} minutes of creation"
                ))
                .with_details(json!({ "elapsedMinutes": elapsed, "windowMinutes": window })));
            }
        }

        self.apply(order, OrderStatus::Cancelled, actor).await
    }
}

#[async_trait]
impl<R, C> OrderQuery for OrderService<R, C>
where
    R: OrderRepository + ?Sized,
    C: PackageSizeCatalog + ?Sized,
{
    async fn get(&self, id: OrderId, sender_id: Option<&str>) -> Result<Option<Order>, Error> {
        let found = match sender_id {
            Some(sender) => self.orders.get_by_id_and_sender(id, sender).await,
            None => self.orders.get_by_id(id).await,
        };
        found.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
