//! Bearer-token extractor for authenticated handlers.
//!
//! Keeps the handlers focused on request/response mapping: the raw
//! `Authorization` header goes straight to the [`Authenticator`] port and the
//! handler receives the resulting identity or the request fails with the
//! gate's error.
//!
//! [`Authenticator`]: crate::domain::ports::Authenticator

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, IdentityContext};
use crate::inbound::http::state::HttpState;

/// Identity of the caller, resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub IdentityContext);

impl Authenticated {
    /// Borrow the resolved identity.
    pub fn identity(&self) -> &IdentityContext {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str().map(str::to_owned));
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let authorization = match header {
                Some(Ok(value)) => Some(value),
                Some(Err(_)) => {
                    return Err(Error::malformed_credential(
                        "authorization header must be 'Bearer <token>'",
                    ));
                }
                None => None,
            };
            state
                .auth
                .authenticate(authorization.as_deref())
                .await
                .map(Self)
        })
    }
}
