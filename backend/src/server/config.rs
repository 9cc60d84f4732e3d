//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use delivery_service::domain::{OrderPolicy, SessionPolicy};
use delivery_service::outbound::persistence::DbPool;
use delivery_service::outbound::session::RedisSessionStore;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    pub(crate) session_policy: SessionPolicy,
    pub(crate) order_policy: OrderPolicy,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis_sessions: Option<RedisSessionStore>,
}

impl ServerConfig {
    /// Construct a configuration backed by in-memory adapters.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            token_secret,
            session_policy: SessionPolicy::default(),
            order_policy: OrderPolicy::default(),
            db_pool: None,
            redis_sessions: None,
        }
    }

    /// Override the token lifetime and audience.
    #[must_use]
    pub fn with_session_policy(mut self, policy: SessionPolicy) -> Self {
        self.session_policy = policy;
        self
    }

    /// Override the weight ceiling and refund window.
    #[must_use]
    pub fn with_order_policy(mut self, policy: OrderPolicy) -> Self {
        self.order_policy = policy;
        self
    }

    /// Attach a database pool; orders, users and the size catalog then live
    /// in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Keep sessions in Redis instead of process memory.
    #[must_use]
    pub fn with_redis_sessions(mut self, store: RedisSessionStore) -> Self {
        self.redis_sessions = Some(store);
        self
    }
}
