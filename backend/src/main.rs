//! Delivery service entry-point: loads settings, wires adapters and serves
//! the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use delivery_service::inbound::http::health::HealthState;
use delivery_service::outbound::persistence::{DbPool, PoolConfig};
use delivery_service::outbound::session::RedisSessionStore;
use delivery_service::settings::DeliverySettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DeliverySettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let token_secret = settings
        .token_secret(cfg!(debug_assertions))
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, token_secret)
        .with_session_policy(settings.session_policy())
        .with_order_policy(settings.order_policy());

    if let Some(url) = settings.database_url.as_deref() {
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|e| std::io::Error::other(format!("create database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }
    if let Some(url) = settings.redis_url.as_deref() {
        let store = RedisSessionStore::connect(url)
            .await
            .map_err(|e| std::io::Error::other(format!("connect session store: {e}")))?;
        config = config.with_redis_sessions(store);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "delivery service listening");
    server.await
}
