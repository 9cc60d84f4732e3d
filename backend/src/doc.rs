//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! domain schemas they exchange and the bearer-token security scheme. Swagger
//! UI serves it in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Error, ErrorCode, IdentityContext, LocationDraft, Order, OrderDraft, OrderStatus,
    PackageDraft, PartyDraft, SessionGrant,
};
use crate::inbound::http::envelope::EnvelopeStatus;
use crate::inbound::http::orders::TransitionRequest;
use crate::inbound::http::users::LoginRequest;

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerToken";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Access token issued by POST /api/v1/users/sign/in.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Delivery service API",
        description = "Session-bound bearer authentication and the shipping order lifecycle."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::sign_in,
        crate::inbound::http::users::sign_out,
        crate::inbound::http::users::private,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::transition_order,
        crate::inbound::http::orders::cancel_order,
        crate::inbound::http::orders::get_sender_order,
        crate::inbound::http::orders::cancel_sender_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        EnvelopeStatus,
        LoginRequest,
        SessionGrant,
        IdentityContext,
        OrderDraft,
        PartyDraft,
        LocationDraft,
        PackageDraft,
        Order,
        OrderStatus,
        TransitionRequest,
    )),
    tags(
        (name = "users", description = "Sign-in, sign-out and identity"),
        (name = "orders", description = "Shipping order lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
