//! Time source abstraction so token expiry can be tested deterministically.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{TimeZone, Utc};

use crate::types::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock frozen at a given instant that tests can move forward.
#[derive(Debug)]
pub struct FixedClock {
    unix_secs: AtomicI64,
}

impl FixedClock {
    pub fn at(instant: Timestamp) -> Self {
        Self {
            unix_secs: AtomicI64::new(instant.timestamp()),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.unix_secs.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        let secs = self.unix_secs.load(Ordering::SeqCst);
        Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now)
    }
}
