//! Shipping order API handlers.
//!
//! ```text
//! POST   /api/v1/order
//! GET    /api/v1/order/{id}
//! PUT    /api/v1/order/{id}                     {"status":"collected"}
//! DELETE /api/v1/order/{id}?refund=true
//! GET    /api/v1/order/{id}/sender/{senderId}
//! DELETE /api/v1/order/{id}/sender/{senderId}?refund=true
//! ```
//!
//! Every route requires a bearer token; the authenticated username is the
//! actor stamped on audit fields.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Order, OrderDraft, OrderId, OrderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;

/// Body of `PUT /api/v1/order/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TransitionRequest {
    /// Target status.
    #[schema(example = "collected")]
    pub status: OrderStatus,
}

/// Query string of the cancel routes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CancelParams {
    /// Claim a refund; only honoured inside the refund window.
    #[serde(default)]
    pub refund: bool,
}

fn missing(id: OrderId) -> Error {
    Error::not_found(format!("order {id} does not exist"))
}

async fn find(state: &HttpState, id: OrderId, sender_id: Option<&str>) -> ApiResult<Order> {
    state
        .orders_query
        .get(id, sender_id)
        .await?
        .ok_or_else(|| missing(id))
}

/// Register a new order in status `created`.
#[utoipa::path(
    post,
    path = "/api/v1/order",
    request_body = OrderDraft,
    responses(
        (status = 201, description = "Order created; the order is in `data`", body = Order),
        (status = 400, description = "A field failed validation", body = Error),
        (status = 401, description = "Missing, invalid or revoked token", body = Error),
        (status = 422, description = "Package too heavy or declared size mismatched", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/order")]
pub async fn create_order(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<OrderDraft>,
) -> ApiResult<HttpResponse> {
    let order = state
        .orders
        .create(payload.into_inner(), caller.identity())
        .await?;
    Ok(Envelope::success("order has been created successfully", order)
        .respond(StatusCode::CREATED))
}

/// Fetch an active order.
#[utoipa::path(
    get,
    path = "/api/v1/order/{id}",
    params(("id" = i64, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order in `data`", body = Order),
        (status = 401, description = "Missing, invalid or revoked token", body = Error),
        (status = 404, description = "No such order", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/order/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let order = find(&state, OrderId::new(path.into_inner()), None).await?;
    Ok(Envelope::success("order obtained successfully", order).respond(StatusCode::OK))
}

/// Move an order along the status graph.
#[utoipa::path(
    put,
    path = "/api/v1/order/{id}",
    params(("id" = i64, Path, description = "Order identifier")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Updated order in `data`", body = Order),
        (status = 400, description = "Unknown status", body = Error),
        (status = 401, description = "Missing, invalid or revoked token", body = Error),
        (status = 404, description = "No such order", body = Error),
        (status = 409, description = "Transition not permitted from the current status", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "transitionOrder"
)]
#[put("/order/{id}")]
pub async fn transition_order(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<i64>,
    payload: web::Json<TransitionRequest>,
) -> ApiResult<HttpResponse> {
    let order = state
        .orders
        .transition(
            OrderId::new(path.into_inner()),
            payload.into_inner().status,
            caller.identity(),
        )
        .await?;
    Ok(Envelope::success("order has been updated successfully", order).respond(StatusCode::OK))
}

/// Cancel an order, optionally claiming a refund.
#[utoipa::path(
    delete,
    path = "/api/v1/order/{id}",
    params(("id" = i64, Path, description = "Order identifier"), CancelParams),
    responses(
        (status = 200, description = "Cancelled order in `data`", body = Order),
        (status = 401, description = "Missing, invalid or revoked token", body = Error),
        (status = 404, description = "No such order", body = Error),
        (status = 409, description = "Order can no longer be cancelled or refunded", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "cancelOrder"
)]
#[delete("/order/{id}")]
pub async fn cancel_order(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<i64>,
    query: web::Query<CancelParams>,
) -> ApiResult<HttpResponse> {
    let order = state
        .orders
        .cancel(
            OrderId::new(path.into_inner()),
            query.refund,
            caller.identity(),
        )
        .await?;
    Ok(Envelope::success("order has been cancelled successfully", order).respond(StatusCode::OK))
}

/// Fetch an order only when it belongs to `senderId`.
#[utoipa::path(
    get,
    path = "/api/v1/order/{id}/sender/{senderId}",
    params(
        ("id" = i64, Path, description = "Order identifier"),
        ("senderId" = String, Path, description = "Sender party identifier")
    ),
    responses(
        (status = 200, description = "Order in `data`", body = Order),
        (status = 401, description = "Missing, invalid or revoked token", body = Error),
        (status = 404, description = "No such order for this sender", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "getSenderOrder"
)]
#[get("/order/{id}/sender/{sender_id}")]
pub async fn get_sender_order(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<(i64, String)>,
) -> ApiResult<HttpResponse> {
    let (id, sender_id) = path.into_inner();
    let order = find(&state, OrderId::new(id), Some(&sender_id)).await?;
    Ok(Envelope::success("order obtained successfully", order).respond(StatusCode::OK))
}

/// Cancel an order only when it belongs to `senderId`.
#[utoipa::path(
    delete,
    path = "/api/v1/order/{id}/sender/{senderId}",
    params(
        ("id" = i64, Path, description = "Order identifier"),
        ("senderId" = String, Path, description = "Sender party identifier"),
        CancelParams
    ),
    responses(
        (status = 200, description = "Cancelled order in `data`", body = Order),
        (status = 401, description = "Missing, invalid or revoked token", body = Error),
        (status = 404, description = "No such order for this sender", body = Error),
        (status = 409, description = "Order can no longer be cancelled or refunded", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "cancelSenderOrder"
)]
#[delete("/order/{id}/sender/{sender_id}")]
pub async fn cancel_sender_order(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<(i64, String)>,
    query: web::Query<CancelParams>,
) -> ApiResult<HttpResponse> {
    let (raw_id, sender_id) = path.into_inner();
    let id = OrderId::new(raw_id);
    find(&state, id, Some(&sender_id)).await?;
    let order = state
        .orders
        .cancel(id, query.refund, caller.identity())
        .await?;
    Ok(Envelope::success("order has been cancelled successfully", order).respond(StatusCode::OK))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
