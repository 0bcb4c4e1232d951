//! Sponsored execution through the Gelato relay network.

use crate::{
    constants::SPONSOR_GAS_BUFFER,
    types::{ChainId, RelayTask},
};
use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Error raised when handing a transaction to the sponsor network.
#[derive(Debug, Error)]
pub enum SponsorError {
    /// No API key is configured for the chain.
    #[error("no sponsor API key configured for chain {0}")]
    MissingApiKey(ChainId),
    /// The sponsor answered with a non-success status.
    #[error("sponsor responded with status {status}")]
    ErrorResponse {
        /// HTTP status of the sponsor response.
        status: u16,
    },
    /// The request never completed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A service that executes transactions on the requester's behalf, for free.
#[async_trait]
pub trait SponsorApi: Send + Sync + 'static {
    /// Submits the transaction for sponsored execution and returns the task
    /// handle tracking it.
    async fn sponsored_call(
        &self,
        chain_id: ChainId,
        target: Address,
        data: Bytes,
        gas_limit: Option<u64>,
    ) -> Result<RelayTask, SponsorError>;
}

/// Adds the sponsor execution overhead on top of a caller-supplied gas limit.
pub fn relay_gas_limit(gas_limit: Option<u64>) -> Option<u64> {
    gas_limit.map(|limit| limit.saturating_add(SPONSOR_GAS_BUFFER))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SponsoredCallBody<'a> {
    chain_id: ChainId,
    target: Address,
    data: &'a Bytes,
    sponsor_api_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_limit: Option<String>,
}

/// [`SponsorApi`] over Gelato's `sponsored-call` endpoint, with one API key
/// per sponsored chain.
#[derive(Debug, Clone)]
pub struct GelatoSponsor {
    client: reqwest::Client,
    url: Url,
    api_keys: HashMap<ChainId, String>,
}

impl GelatoSponsor {
    /// Creates a sponsor client against `url`.
    pub fn new(client: reqwest::Client, url: Url, api_keys: HashMap<ChainId, String>) -> Self {
        Self { client, url, api_keys }
    }

    fn endpoint(&self) -> String {
        format!("{}/relays/v2/sponsored-call", self.url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl SponsorApi for GelatoSponsor {
    async fn sponsored_call(
        &self,
        chain_id: ChainId,
        target: Address,
        data: Bytes,
        gas_limit: Option<u64>,
    ) -> Result<RelayTask, SponsorError> {
        let api_key =
            self.api_keys.get(&chain_id).ok_or(SponsorError::MissingApiKey(chain_id))?;
        let body = SponsoredCallBody {
            chain_id,
            target,
            data: &data,
            sponsor_api_key: api_key,
            gas_limit: relay_gas_limit(gas_limit).map(|limit| limit.to_string()),
        };

        let response = self.client.post(self.endpoint()).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, %chain_id, %target, "sponsor rejected the call");
            return Err(SponsorError::ErrorResponse { status: status.as_u16() });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_limit_carries_the_sponsor_buffer() {
        assert_eq!(relay_gas_limit(Some(100_000)), Some(250_000));
        assert_eq!(relay_gas_limit(None), None);
        assert_eq!(relay_gas_limit(Some(u64::MAX)), Some(u64::MAX));
    }

    #[test]
    fn endpoint_tolerates_trailing_slashes() {
        let sponsor = GelatoSponsor::new(
            reqwest::Client::new(),
            "https://api.gelato.digital/".parse().unwrap(),
            HashMap::new(),
        );
        assert_eq!(sponsor.endpoint(), "https://api.gelato.digital/relays/v2/sponsored-call");
    }

    #[test]
    fn body_serializes_camel_case() {
        let body = SponsoredCallBody {
            chain_id: 5,
            target: Address::repeat_byte(0x11),
            data: &Bytes::from(vec![0xde, 0xad]),
            sponsor_api_key: "key",
            gas_limit: Some("250000".into()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["chainId"], 5);
        assert_eq!(json["sponsorApiKey"], "key");
        assert_eq!(json["gasLimit"], "250000");
        assert_eq!(json["data"], "0xdead");
    }

    #[tokio::test]
    async fn missing_api_key_is_an_error() {
        let sponsor = GelatoSponsor::new(
            reqwest::Client::new(),
            "https://api.gelato.digital".parse().unwrap(),
            HashMap::new(),
        );
        let err = sponsor
            .sponsored_call(5, Address::ZERO, Bytes::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SponsorError::MissingApiKey(5)));
    }
}
