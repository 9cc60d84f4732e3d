//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories and the size catalog via Diesel
//! - **session**: Redis-backed and in-memory session stores
//! - **security**: HS256 token signing and salted credential digests
//! - **memory**: in-process repositories for local runs and tests
//!
//! Adapters translate between infrastructure and domain types only; they
//! hold no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
pub mod session;
