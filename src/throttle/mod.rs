//! Per-address relay rate limiting.
//!
//! Quota is tracked per `(chain, address)` inside a sliding window. The
//! limiter decides, the [`ThrottleStore`] remembers; swapping the in-memory
//! store for a shared backend changes no limiter code.

mod store;

pub use store::{
    Clock, InMemoryThrottleStore, StorageError, SystemClock, ThrottleRecord, ThrottleStore,
};

#[cfg(test)]
pub(crate) use store::test_clock::TestClock;

use crate::types::{ChainId, RelayLimit};
use alloy::primitives::Address;
use std::sync::Arc;

/// Enforces the per-address relay quota.
#[derive(Clone)]
pub struct RelayLimiter {
    store: Arc<dyn ThrottleStore>,
    ttl_secs: u64,
    limit: u32,
}

impl RelayLimiter {
    /// Creates a limiter allowing `limit` relays per address inside each
    /// `ttl_secs` window.
    pub fn new(store: Arc<dyn ThrottleStore>, ttl_secs: u64, limit: u32) -> Self {
        Self { store, ttl_secs, limit }
    }

    fn key(chain_id: ChainId, address: Address) -> String {
        format!("{chain_id}:{address}")
    }

    /// Returns whether every address still has quota left.
    pub async fn can_relay(
        &self,
        chain_id: ChainId,
        addresses: &[Address],
    ) -> Result<bool, StorageError> {
        for address in addresses {
            let record = self.store.get(&Self::key(chain_id, *address)).await?;
            if record.is_some_and(|record| record.hits >= self.limit) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Records one relay against every address.
    pub async fn increment(
        &self,
        chain_id: ChainId,
        addresses: &[Address],
    ) -> Result<(), StorageError> {
        for address in addresses {
            self.store.increment(&Self::key(chain_id, *address), self.ttl_secs).await?;
        }
        Ok(())
    }

    /// Returns the quota and what remains of it for one address.
    pub async fn relay_limit(
        &self,
        chain_id: ChainId,
        address: Address,
    ) -> Result<RelayLimit, StorageError> {
        let hits = self
            .store
            .get(&Self::key(chain_id, address))
            .await?
            .map(|record| record.hits)
            .unwrap_or_default();
        Ok(RelayLimit { limit: self.limit, remaining: self.limit.saturating_sub(hits) })
    }
}

impl std::fmt::Debug for RelayLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayLimiter")
            .field("ttl_secs", &self.ttl_secs)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
