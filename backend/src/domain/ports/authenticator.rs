//! Driving port for bearer-token authentication.

use async_trait::async_trait;

use crate::domain::{Error, IdentityContext};

/// Turns a raw `Authorization` header into an identity.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Validate `authorization` and return the caller's identity.
    ///
    /// Read-only: never writes to the session store.
    async fn authenticate(&self, authorization: Option<&str>) -> Result<IdentityContext, Error>;
}
