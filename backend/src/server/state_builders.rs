//! Builders wiring driven adapters into the driving ports held by
//! [`HttpState`].

use std::sync::Arc;

use delivery_service::domain::ports::{
    OrderRepository, PackageSizeCatalog, SessionStore, UserRepository,
};
use delivery_service::domain::{AuthGate, OrderService, SessionService};
use delivery_service::inbound::http::state::HttpState;
use delivery_service::outbound::memory::{
    InMemoryOrderRepository, InMemoryUserRepository, StaticPackageSizeCatalog,
};
use delivery_service::outbound::persistence::{
    DieselOrderRepository, DieselPackageSizeCatalog, DieselUserRepository,
};
use delivery_service::outbound::security::{HmacTokenSigner, Sha256CredentialHasher};
use delivery_service::outbound::session::InMemorySessionStore;
use mockable::Clock;
use tracing::warn;

use super::ServerConfig;

type Repositories = (
    Arc<dyn OrderRepository>,
    Arc<dyn PackageSizeCatalog>,
    Arc<dyn UserRepository>,
);

fn build_repositories(config: &ServerConfig) -> Repositories {
    match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselOrderRepository::new(pool.clone())),
            Arc::new(DieselPackageSizeCatalog::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; orders and users are kept in memory");
            (
                Arc::new(InMemoryOrderRepository::new()),
                Arc::new(StaticPackageSizeCatalog::default()),
                Arc::new(InMemoryUserRepository::new()),
            )
        }
    }
}

fn build_session_store(config: &ServerConfig, clock: &Arc<dyn Clock>) -> Arc<dyn SessionStore> {
    match &config.redis_sessions {
        Some(store) => Arc::new(store.clone()),
        None => {
            warn!("no Redis configured; sessions are kept in memory");
            Arc::new(InMemorySessionStore::new(clock.clone()))
        }
    }
}

/// Build the handler state for `config`.
///
/// The Auth Gate and the session service share one signer and one session
/// store so a sign-in immediately revokes tokens the gate would otherwise
/// accept.
pub(crate) fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> HttpState {
    let (orders, catalog, users) = build_repositories(config);
    let sessions = build_session_store(config, &clock);
    let signer = Arc::new(HmacTokenSigner::new(
        config.token_secret.to_vec(),
        config.session_policy.audience.clone(),
    ));

    let gate = Arc::new(AuthGate::new(
        signer.clone(),
        sessions.clone(),
        clock.clone(),
    ));
    let login = Arc::new(SessionService::new(
        users,
        Arc::new(Sha256CredentialHasher::default()),
        signer,
        sessions,
        clock.clone(),
        config.session_policy.clone(),
    ));
    let order_service = Arc::new(OrderService::new(
        orders,
        catalog,
        clock,
        config.order_policy,
    ));

    HttpState::new(gate, login, order_service.clone(), order_service)
}
