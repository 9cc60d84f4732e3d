//! Port for user account lookup and provisioning.

use async_trait::async_trait;

use crate::domain::{NewUserAccount, UserAccount, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An active account already uses the username.
        Duplicate { username: String } => "user {username} already exists",
    }
}

/// Account storage consulted by sign-in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the active account registered under `username`.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Insert a new active account.
    async fn insert(&self, account: &NewUserAccount) -> Result<UserId, UserRepositoryError>;
}
