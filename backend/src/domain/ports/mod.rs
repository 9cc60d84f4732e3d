//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod credential_hasher;
mod login_service;
mod order_command;
mod order_query;
mod order_repository;
mod package_size_catalog;
mod session_store;
mod token_signer;
mod user_repository;

pub use authenticator::Authenticator;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
pub use login_service::LoginService;
pub use order_command::OrderCommand;
pub use order_query::OrderQuery;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use package_size_catalog::MockPackageSizeCatalog;
pub use package_size_catalog::{PackageSizeCatalog, PackageSizeCatalogError};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use token_signer::MockTokenSigner;
pub use token_signer::{TokenSigner, TokenSignerError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
