//! Bearer-token authentication backed by the session store.
//!
//! Validation runs as independent gates, in order: header shape, signature
//! and claims, expiry against the injected clock, then the live session for
//! the token's username. A token can be well signed and unexpired yet still
//! revoked because a newer sign-in or a sign-out replaced it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use mockable::Clock;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::domain::ports::{
    Authenticator, SessionStore, SessionStoreError, TokenSigner, TokenSignerError,
};
use crate::domain::{BearerToken, Error, IdentityContext, TokenClaims};

pub(crate) fn map_session_store_error(error: SessionStoreError) -> Error {
    match error {
        SessionStoreError::Unavailable { message } => {
            Error::session_store_unavailable(format!("session store unavailable: {message}"))
        }
    }
}

fn map_signer_error(error: TokenSignerError) -> Error {
    match error {
        TokenSignerError::Malformed { message } => {
            Error::invalid_token(format!("access token is malformed: {message}"))
        }
        TokenSignerError::Signature => Error::invalid_token("access token signature is invalid"),
        TokenSignerError::Signing { message } => {
            Error::internal(format!("token verification failed: {message}"))
        }
    }
}

fn tokens_match(stored: &str, presented: &str) -> bool {
    stored.as_bytes().ct_eq(presented.as_bytes()).into()
}

fn identity_from(claims: TokenClaims) -> Result<IdentityContext, Error> {
    let TokenClaims {
        user_id,
        username,
        application,
        audience,
        expires_at,
        ..
    } = claims;
    let expiry = DateTime::from_timestamp(expires_at, 0)
        .ok_or_else(|| Error::invalid_token("access token expiry is out of range"))?;
    Ok(IdentityContext {
        user_id,
        username,
        application,
        audience,
        expires_at: expiry,
    })
}

/// Authentication gate implementing the [`Authenticator`] driving port.
#[derive(Clone)]
pub struct AuthGate<T: ?Sized, S: ?Sized> {
    signer: Arc<T>,
    sessions: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<T: ?Sized, S: ?Sized> AuthGate<T, S> {
    /// Create a gate over the token signer and session store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use delivery_service::domain::AuthGate;
    /// use delivery_service::outbound::security::HmacTokenSigner;
    /// use delivery_service::outbound::session::InMemorySessionStore;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let gate = AuthGate::new(
    ///     Arc::new(HmacTokenSigner::new(b"secret".to_vec(), "delivery-service")),
    ///     Arc::new(InMemorySessionStore::new(clock.clone())),
    ///     clock,
    /// );
    /// # let _ = gate;
    /// ```
    pub fn new(signer: Arc<T>, sessions: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            signer,
            sessions,
            clock,
        }
    }
}

#[async_trait]
impl<T, S> Authenticator for AuthGate<T, S>
where
    T: TokenSigner + ?Sized,
    S: SessionStore + ?Sized,
{
    async fn authenticate(&self, authorization: Option<&str>) -> Result<IdentityContext, Error> {
        let token = BearerToken::from_header(authorization).ok_or_else(|| {
            Error::malformed_credential("authorization header must be 'Bearer <token>'")
        })?;

        let claims = self
            .signer
            .verify(token.as_str())
            .map_err(map_signer_error)?;

        if claims.is_expired_at(self.clock.utc()) {
            return Err(Error::expired_token("access token has expired"));
        }

        let stored = self
            .sessions
            .get(&claims.username)
            .await
            .map_err(map_session_store_error)?;

        match stored {
            Some(live) if tokens_match(&live, token.as_str()) => identity_from(claims),
            Some(_) => {
                debug!(username = %claims.username, "token superseded by newer session");
                Err(Error::revoked_session("session has been replaced or closed"))
            }
            None => {
                debug!(username = %claims.username, "no live session for token");
                Err(Error::revoked_session("session has been replaced or closed"))
            }
        }
    }
}

#[cfg(test)]
#[path = "auth_gate_tests.rs"]
mod tests;
