//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, LoginService, OrderCommand, OrderQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn Authenticator>,
    pub login: Arc<dyn LoginService>,
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrderQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        auth: Arc<dyn Authenticator>,
        login: Arc<dyn LoginService>,
        orders: Arc<dyn OrderCommand>,
        orders_query: Arc<dyn OrderQuery>,
    ) -> Self {
        Self {
            auth,
            login,
            orders,
            orders_query,
        }
    }
}
