//! Port for the key-expiring session store.
//!
//! Maps a username to the single access token currently valid for it.
//! Every operation touches one key and must be atomic for that key.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Username;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// The backing store could not be reached or rejected the command.
        Unavailable { message: String } =>
            "session store unavailable: {message}",
    }
}

/// Username to live-token map with per-entry expiry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Token currently stored for `username`, if any and not expired.
    async fn get(&self, username: &Username) -> Result<Option<String>, SessionStoreError>;

    /// Store `token` for `username`, replacing any previous entry.
    async fn set(
        &self,
        username: &Username,
        token: &str,
        ttl: Duration,
    ) -> Result<(), SessionStoreError>;

    /// Remove the entry for `username`; absent keys are not an error.
    async fn delete(&self, username: &Username) -> Result<(), SessionStoreError>;
}
