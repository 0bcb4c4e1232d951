//! Relay orchestration: classify, validate, throttle, sponsor.

use crate::{
    classify::classify,
    error::RelayError,
    policy::{validate, Acceptance, RejectionReason, ValidationOutcome},
    safe_info::SafeInfoApi,
    sponsor::SponsorApi,
    throttle::RelayLimiter,
    types::{ChainId, RelayLimit, RelayRequest, RelayTask, SupportedChain},
};
use alloy::primitives::Address;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// The relay service.
///
/// Owns the admission pipeline end to end: every request is classified and
/// validated before any quota or sponsor call, so rejected calldata never
/// consumes quota.
#[derive(Clone)]
pub struct Relay {
    limiter: RelayLimiter,
    sponsor: Arc<dyn SponsorApi>,
    safe_info: Arc<dyn SafeInfoApi>,
}

impl Relay {
    /// Composes the relay from its parts.
    pub fn new(
        limiter: RelayLimiter,
        sponsor: Arc<dyn SponsorApi>,
        safe_info: Arc<dyn SafeInfoApi>,
    ) -> Self {
        Self { limiter, sponsor, safe_info }
    }

    /// Admits and sponsors one transaction.
    #[instrument(skip(self, request), fields(chain_id = request.chain_id, to = %request.to))]
    pub async fn sponsored_call(&self, request: RelayRequest) -> Result<RelayTask, RelayError> {
        let chain = SupportedChain::try_from(request.chain_id)?;

        let acceptance = match validate(chain, request.to, &classify(&request.data)) {
            ValidationOutcome::Accepted(acceptance) => acceptance,
            ValidationOutcome::Rejected(reason) => return Err(reason.into()),
        };
        self.check_deployed_safe(request.chain_id, &acceptance).await?;

        if !self.limiter.can_relay(request.chain_id, &acceptance.limit_addresses).await? {
            return Err(RelayError::RateLimitExceeded);
        }

        let task = self
            .sponsor
            .sponsored_call(request.chain_id, request.to, request.data, request.gas_limit)
            .await?;

        // The relay already happened; a failed bookkeeping write must not turn
        // it into a client-visible error.
        if let Err(err) =
            self.limiter.increment(request.chain_id, &acceptance.limit_addresses).await
        {
            error!(%err, "failed to record relay against quota");
        }

        info!(task_id = %task.task_id, %chain, "sponsored transaction");
        Ok(task)
    }

    /// Returns the relay quota left for `address` on `chain_id`.
    pub async fn relay_limit(
        &self,
        chain_id: ChainId,
        address: Address,
    ) -> Result<RelayLimit, RelayError> {
        SupportedChain::try_from(chain_id)?;
        Ok(self.limiter.relay_limit(chain_id, address).await?)
    }

    /// Confirms with the Safe-Info oracle that an admitted self-call targets a
    /// deployed Safe.
    async fn check_deployed_safe(
        &self,
        chain_id: ChainId,
        acceptance: &Acceptance,
    ) -> Result<(), RelayError> {
        if let Some(safe) = acceptance.verify_safe {
            if !self.safe_info.is_safe(chain_id, safe).await {
                return Err(RejectionReason::NotASafe(safe).into());
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay").field("limiter", &self.limiter).finish_non_exhaustive()
    }
}
