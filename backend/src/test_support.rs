//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and the integration suites in `tests/`.
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock whose current instant only moves when a test advances it.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use mockable::Clock;
/// use delivery_service::test_support::MutableClock;
///
/// let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// let clock = MutableClock::new(start);
/// clock.advance_minutes(3);
/// assert_eq!((clock.utc() - start).num_minutes(), 3);
/// ```
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let step = match TimeDelta::from_std(delta) {
            Ok(step) => step,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += step;
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    /// Move the clock forward by whole minutes.
    pub fn advance_minutes(&self, minutes: i64) {
        *self.lock_clock() += TimeDelta::minutes(minutes);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
