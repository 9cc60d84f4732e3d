//! Redis-backed `SessionStore`.
//!
//! Each session is one string key, `delivery:session:<username>`, written
//! with `SET EX` so expiry is enforced by Redis itself.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::{AsyncCommands, RedisError};
use bb8_redis::{RedisConnectionManager, bb8};
use tracing::debug;

use crate::domain::Username;
use crate::domain::ports::{SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "delivery:session:";

fn session_key(username: &Username) -> String {
    format!("{KEY_PREFIX}{username}")
}

fn map_redis_error(error: RedisError) -> SessionStoreError {
    debug!(kind = ?error.kind(), "redis command failed");
    SessionStoreError::unavailable(error.to_string())
}

fn map_pool_error(error: bb8::RunError<RedisError>) -> SessionStoreError {
    match error {
        bb8::RunError::User(inner) => map_redis_error(inner),
        bb8::RunError::TimedOut => SessionStoreError::unavailable("timed out waiting for connection"),
    }
}

/// Session store over a pooled Redis connection.
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl RedisSessionStore {
    /// Wrap an existing pool.
    pub fn new(pool: bb8::Pool<RedisConnectionManager>) -> Self {
        Self { pool }
    }

    /// Build a pool for `redis_url` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Unavailable`] when the URL is invalid or
    /// no initial connection can be opened.
    pub async fn connect(redis_url: &str) -> Result<Self, SessionStoreError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(map_redis_error)?;
        let pool = bb8::Pool::builder()
            .connection_timeout(Duration::from_secs(5))
            .build(manager)
            .await
            .map_err(map_redis_error)?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, username: &Username) -> Result<Option<String>, SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.get::<_, Option<String>>(session_key(username))
            .await
            .map_err(map_redis_error)
    }

    async fn set(
        &self,
        username: &Username,
        token: &str,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        // SET EX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.set_ex::<_, _, ()>(session_key(username), token, seconds)
            .await
            .map_err(map_redis_error)
    }

    async fn delete(&self, username: &Username) -> Result<(), SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.del::<_, ()>(session_key(username))
            .await
            .map_err(map_redis_error)
    }
}
