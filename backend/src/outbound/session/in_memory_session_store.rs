//! Process-local `SessionStore` for development and tests.
//!
//! Entries carry their own deadline, read from the injected clock, so
//! expiry behaves like the Redis adapter without a background sweeper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::Username;
use crate::domain::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
struct Entry {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Mutex-guarded username to token map.
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    /// Create an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, SessionStoreError> {
        self.entries
            .lock()
            .map_err(|_| SessionStoreError::unavailable("session map poisoned"))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, username: &Username) -> Result<Option<String>, SessionStoreError> {
        let now = self.clock.utc();
        let mut entries = self.lock()?;
        match entries.get(username.as_ref()) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.token.clone())),
            Some(_) => {
                entries.remove(username.as_ref());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        username: &Username,
        token: &str,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let lifetime = TimeDelta::from_std(ttl)
            .map_err(|err| SessionStoreError::unavailable(format!("ttl out of range: {err}")))?;
        let expires_at = self
            .clock
            .utc()
            .checked_add_signed(lifetime)
            .ok_or_else(|| SessionStoreError::unavailable("ttl overflows the clock"))?;
        self.lock()?.insert(
            username.as_ref().to_owned(),
            Entry {
                token: token.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, username: &Username) -> Result<(), SessionStoreError> {
        self.lock()?.remove(username.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::MutableClock;

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("instant");
        Arc::new(MutableClock::new(start))
    }

    fn user() -> Username {
        Username::new("ops@example.com").expect("username")
    }

    #[rstest]
    #[tokio::test]
    async fn set_replaces_previous_token(clock: Arc<MutableClock>) {
        let store = InMemorySessionStore::new(clock);
        store
            .set(&user(), "first", Duration::from_secs(60))
            .await
            .expect("set");
        store
            .set(&user(), "second", Duration::from_secs(60))
            .await
            .expect("set");
        assert_eq!(
            store.get(&user()).await.expect("get").as_deref(),
            Some("second")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn entries_expire_at_their_deadline(clock: Arc<MutableClock>) {
        let store = InMemorySessionStore::new(clock.clone());
        store
            .set(&user(), "token", Duration::from_secs(60))
            .await
            .expect("set");

        clock.advance_seconds(59);
        assert!(store.get(&user()).await.expect("get").is_some());
        clock.advance_seconds(1);
        assert!(store.get(&user()).await.expect("get").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_absent_key_succeeds(clock: Arc<MutableClock>) {
        let store = InMemorySessionStore::new(clock);
        store.delete(&user()).await.expect("idempotent delete");
        assert!(store.get(&user()).await.expect("get").is_none());
    }
}
