//! Driving port for the session lifecycle.
//!
//! Inbound adapters call it to open and close sessions without importing
//! the user store, hasher, signer or session store behind it.

use async_trait::async_trait;

use crate::domain::{Error, IdentityContext, LoginCredentials, SessionGrant};

/// Sign-in and sign-out use-cases.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials, replace the user's session and return a token.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SessionGrant, Error>;

    /// Drop the caller's session. Succeeds when no session exists.
    async fn sign_out(&self, identity: &IdentityContext) -> Result<(), Error>;
}
