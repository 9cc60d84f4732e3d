//! Delivery service library: shipping order lifecycle behind session-bound
//! bearer authentication.
//!
//! - [`domain`]: entities, the error taxonomy, services and ports
//! - [`inbound`]: the Actix Web adapter
//! - [`outbound`]: PostgreSQL, Redis, security and in-memory adapters
//! - [`settings`]: layered configuration

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
