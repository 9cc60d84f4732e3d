//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{Authenticator, LoginService};
use crate::domain::{
    Application, Error, IdentityContext, LoginCredentials, OrderPolicy, OrderService,
    SessionGrant, UserId, Username,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryOrderRepository, StaticPackageSizeCatalog};

/// Token accepted by [`StubAuthenticator`].
pub const VALID_TOKEN: &str = "valid.test.token";
/// Password accepted by [`StubLogin`].
pub const VALID_PASSWORD: &str = "hunter2";

/// Identity returned for [`VALID_TOKEN`].
pub fn identity() -> IdentityContext {
    IdentityContext {
        user_id: UserId::new(7),
        username: Username::new("ops@example.com").expect("fixture username"),
        application: Application::new("dispatch-console").expect("fixture application"),
        audience: "delivery-service".to_owned(),
        expires_at: Utc
            .with_ymd_and_hms(2030, 1, 1, 0, 0, 0)
            .single()
            .expect("fixture expiry"),
    }
}

/// Accepts only `Bearer <VALID_TOKEN>`.
pub struct StubAuthenticator;

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn authenticate(&self, authorization: Option<&str>) -> Result<IdentityContext, Error> {
        let header = authorization
            .filter(|value| value.starts_with("Bearer "))
            .ok_or_else(|| Error::malformed_credential("authorization header must be 'Bearer <token>'"))?;
        if header == format!("Bearer {VALID_TOKEN}") {
            Ok(identity())
        } else {
            Err(Error::invalid_token("access token signature is invalid"))
        }
    }
}

/// Issues [`VALID_TOKEN`] for the fixture identity and [`VALID_PASSWORD`].
pub struct StubLogin;

#[async_trait]
impl LoginService for StubLogin {
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SessionGrant, Error> {
        if credentials.username().as_ref() != "ops@example.com" {
            return Err(Error::not_found(format!(
                "user {} does not exist",
                credentials.username()
            )));
        }
        if credentials.password() != VALID_PASSWORD {
            return Err(Error::invalid_credential("wrong username or password"));
        }
        Ok(SessionGrant {
            access_token: VALID_TOKEN.to_owned(),
            expires_at: identity().expires_at,
        })
    }

    async fn sign_out(&self, _identity: &IdentityContext) -> Result<(), Error> {
        Ok(())
    }
}

/// State backed by stub auth and an in-memory order service on `clock`.
pub fn stub_state_with_clock(clock: Arc<dyn Clock>) -> HttpState {
    let orders = Arc::new(OrderService::new(
        Arc::new(InMemoryOrderRepository::new()),
        Arc::new(StaticPackageSizeCatalog::default()),
        clock,
        OrderPolicy::default(),
    ));
    HttpState::new(
        Arc::new(StubAuthenticator),
        Arc::new(StubLogin),
        orders.clone(),
        orders,
    )
}

/// [`stub_state_with_clock`] on the system clock.
pub fn stub_state() -> HttpState {
    stub_state_with_clock(Arc::new(DefaultClock))
}
