//! Process-local `UserRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUserAccount, UserAccount, UserId, Username};

#[derive(Default)]
struct Users {
    next_id: i64,
    by_username: HashMap<String, UserAccount>,
}

/// Mutex-guarded account map keyed by username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<Users>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Users>, UserRepositoryError> {
        self.state
            .lock()
            .map_err(|_| UserRepositoryError::connection("user map poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        Ok(self.lock()?.by_username.get(username.as_ref()).cloned())
    }

    async fn insert(&self, account: &NewUserAccount) -> Result<UserId, UserRepositoryError> {
        let mut state = self.lock()?;
        let key = account.username.as_ref().to_owned();
        if state.by_username.contains_key(&key) {
            return Err(UserRepositoryError::duplicate(key));
        }
        state.next_id += 1;
        let id = UserId::new(state.next_id);
        state.by_username.insert(
            key,
            UserAccount {
                id,
                username: account.username.clone(),
                application: account.application.clone(),
                password_hash: account.password_hash.clone(),
            },
        );
        Ok(id)
    }
}
