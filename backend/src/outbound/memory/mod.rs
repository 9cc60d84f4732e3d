//! In-process adapters used when PostgreSQL is not configured.
//!
//! They honour the same port contracts as the Diesel adapters, minus
//! durability, and back the HTTP integration suites.

mod in_memory_order_repository;
mod in_memory_user_repository;
mod static_package_size_catalog;

pub use in_memory_order_repository::InMemoryOrderRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use static_package_size_catalog::StaticPackageSizeCatalog;
