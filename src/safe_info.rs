//! Deployed-Safe lookups against the Safe client gateway.

use crate::types::ChainId;
use alloy::primitives::Address;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Answers whether an address is a deployed Safe.
#[async_trait]
pub trait SafeInfoApi: Send + Sync + 'static {
    /// Returns true iff `address` is a Safe the gateway knows on `chain_id`.
    async fn is_safe(&self, chain_id: ChainId, address: Address) -> bool;
}

/// [`SafeInfoApi`] over the Safe client gateway's safes endpoint.
///
/// Any failure reads as "not a Safe": the lookup gates sponsorship, and an
/// unreachable gateway must not open it up.
#[derive(Debug, Clone)]
pub struct GatewaySafeInfo {
    client: reqwest::Client,
    url: Url,
}

impl GatewaySafeInfo {
    /// Creates a lookup client against the gateway at `url`.
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    fn endpoint(&self, chain_id: ChainId, address: Address) -> String {
        format!(
            "{}/v1/chains/{chain_id}/safes/{address}",
            self.url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SafeInfoApi for GatewaySafeInfo {
    async fn is_safe(&self, chain_id: ChainId, address: Address) -> bool {
        match self.client.get(self.endpoint(chain_id, address)).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(%err, %chain_id, %address, "safe lookup failed");
                false
            }
        }
    }
}
