//! Sign-in and sign-out over a single-session-per-user store.
//!
//! A successful sign-in overwrites the stored token for the username, which
//! revokes every token minted earlier for the same account.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SubsecRound, TimeDelta};
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::auth_gate::map_session_store_error;
use crate::domain::ports::{
    CredentialHasher, LoginService, SessionStore, TokenSigner, TokenSignerError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{Error, IdentityContext, LoginCredentials, SessionGrant, TokenClaims};

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::storage_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::storage_unavailable(format!("user repository error: {message}"))
        }
        UserRepositoryError::Duplicate { username } => {
            Error::internal(format!("unexpected duplicate user {username}"))
        }
    }
}

fn map_signing_error(error: TokenSignerError) -> Error {
    Error::internal(format!("could not mint access token: {error}"))
}

/// Token lifetime and audience applied to every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Lifetime of both the token and its session entry.
    pub ttl: Duration,
    /// Audience embedded in minted tokens.
    pub audience: String,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            audience: "delivery-service".to_owned(),
        }
    }
}

/// Session service implementing the [`LoginService`] driving port.
#[derive(Clone)]
pub struct SessionService<U: ?Sized, H: ?Sized, T: ?Sized, S: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    signer: Arc<T>,
    sessions: Arc<S>,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
}

impl<U: ?Sized, H: ?Sized, T: ?Sized, S: ?Sized> SessionService<U, H, T, S> {
    /// Create a session service from its collaborators.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        signer: Arc<T>,
        sessions: Arc<S>,
        clock: Arc<dyn Clock>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            users,
            hasher,
            signer,
            sessions,
            clock,
            policy,
        }
    }
}

#[async_trait]
impl<U, H, T, S> LoginService for SessionService<U, H, T, S>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenSigner + ?Sized,
    S: SessionStore + ?Sized,
{
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SessionGrant, Error> {
        let username = credentials.username();
        let account = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {username} does not exist")))?;

        if !self
            .hasher
            .verify(&account.password_hash, credentials.password())
        {
            return Err(Error::invalid_credential("wrong username or password"));
        }

        let ttl = TimeDelta::from_std(self.policy.ttl)
            .map_err(|err| Error::internal(format!("session ttl out of range: {err}")))?;
        let expires_at = self
            .clock
            .utc()
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::internal("session expiry overflowed"))?
            .trunc_subsecs(0);
        let claims = TokenClaims {
            user_id: account.id,
            username: account.username.clone(),
            application: account.application,
            audience: self.policy.audience.clone(),
            expires_at: expires_at.timestamp(),
            token_id: Uuid::new_v4(),
        };
        let access_token = self.signer.sign(&claims).map_err(map_signing_error)?;

        self.sessions
            .set(&account.username, &access_token, self.policy.ttl)
            .await
            .map_err(map_session_store_error)?;
        info!(username = %account.username, user_id = %account.id, "session opened");

        Ok(SessionGrant {
            access_token,
            expires_at,
        })
    }

    async fn sign_out(&self, identity: &IdentityContext) -> Result<(), Error> {
        self.sessions
            .delete(&identity.username)
            .await
            .map_err(map_session_store_error)?;
        info!(username = %identity.username, "session closed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
