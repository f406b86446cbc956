//! Single-slot time-to-live cache for fetched forecasts.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Holds at most one value and serves it until the TTL has elapsed.
///
/// The slot is guarded by a mutex so the cache can be shared between
/// request handlers. Each `*_at` method takes the current instant explicitly
/// for deterministic tests.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<(Instant, T)>>,
}

impl<T: Clone> TtlCache<T> {
    /// Creates an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns how long a stored value stays fresh.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, Option<(Instant, T)>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fresh(&self, stored_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(stored_at) < self.ttl
    }

    /// Returns the cached value if it has not expired.
    pub fn get(&self) -> Option<T> {
        self.get_at(Instant::now())
    }

    /// Returns the cached value as of `now`, dropping it when expired.
    pub fn get_at(&self, now: Instant) -> Option<T> {
        let mut slot = self.lock();
        let fresh = slot
            .as_ref()
            .is_some_and(|(stored_at, _)| self.fresh(*stored_at, now));
        if !fresh {
            *slot = None;
            return None;
        }
        slot.as_ref().map(|(_, value)| value.clone())
    }

    /// Stores a value, replacing any previous one.
    pub fn set(&self, value: T) {
        self.set_at(value, Instant::now());
    }

    /// Stores a value as fetched at `now`, replacing any previous one.
    pub fn set_at(&self, value: T, now: Instant) {
        *self.lock() = Some((now, value));
    }

    /// Drops the stored value so the next read misses.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Whether a value is present and unexpired.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }

    /// Whether a value is present and unexpired as of `now`.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|(stored_at, _)| self.fresh(*stored_at, now))
    }
}
