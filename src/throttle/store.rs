//! Hit-count storage backing the rate limiter.

use async_trait::async_trait;
use dashmap::DashMap;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use thiserror::Error;

/// Error raised by a throttle store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or answered with garbage.
    #[error("throttle store unavailable: {0}")]
    Unavailable(String),
}

/// A hit counter for one throttle key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleRecord {
    /// Hits recorded inside the current window.
    pub hits: u32,
    /// Unix timestamp at which the window ends.
    pub expires_at: u64,
}

/// Storage of per-key hit counts with window expiry.
///
/// Implementations must expire a record once its window has passed; `get`
/// returns `None` both for unknown keys and expired windows.
#[async_trait]
pub trait ThrottleStore: Send + Sync + 'static {
    /// Returns the live record for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<ThrottleRecord>, StorageError>;

    /// Records one hit for `key`, starting a fresh window of `ttl_secs` if no
    /// live record exists, and returns the updated record.
    async fn increment(&self, key: &str, ttl_secs: u64) -> Result<ThrottleRecord, StorageError>;
}

/// A source of the current unix time, injectable so window expiry is testable.
pub trait Clock: Send + Sync + 'static {
    /// The current unix timestamp in seconds.
    fn now(&self) -> u64;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
    }
}

/// An in-process [`ThrottleStore`] over a concurrent map.
#[derive(Debug)]
pub struct InMemoryThrottleStore<C = SystemClock> {
    records: DashMap<String, ThrottleRecord>,
    clock: C,
}

impl InMemoryThrottleStore<SystemClock> {
    /// Creates a store ticking on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryThrottleStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryThrottleStore<C> {
    /// Creates a store ticking on `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { records: DashMap::new(), clock }
    }
}

#[async_trait]
impl<C: Clock> ThrottleStore for InMemoryThrottleStore<C> {
    async fn get(&self, key: &str) -> Result<Option<ThrottleRecord>, StorageError> {
        let now = self.clock.now();
        Ok(self.records.get(key).map(|record| *record).filter(|record| record.expires_at > now))
    }

    async fn increment(&self, key: &str, ttl_secs: u64) -> Result<ThrottleRecord, StorageError> {
        let now = self.clock.now();
        // The entry guard keeps read-check-update atomic per key.
        let mut entry = self
            .records
            .entry(key.to_owned())
            .or_insert(ThrottleRecord { hits: 0, expires_at: now + ttl_secs });
        if entry.expires_at <= now {
            *entry = ThrottleRecord { hits: 0, expires_at: now + ttl_secs };
        }
        entry.hits = entry.hits.saturating_add(1);
        Ok(*entry)
    }
}

impl<C: Clock> Clock for Arc<C> {
    fn now(&self) -> u64 {
        self.as_ref().now()
    }
}
