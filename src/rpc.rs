//! REST surface of the relay.

use crate::{error::RelayError, relay::Relay, types::RelayRequest};
use alloy::primitives::Address;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

/// Builds the relay router.
pub fn router(relay: Relay) -> Router {
    Router::new()
        .route("/v1/relay", post(sponsored_call))
        .route("/v1/relay/{chain_id}/{address}", get(relay_limit))
        .with_state(relay)
}

async fn sponsored_call(
    State(relay): State<Relay>,
    Json(request): Json<RelayRequest>,
) -> Result<impl IntoResponse, RelayError> {
    let task = relay.sponsored_call(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

// Path segments stay strings so a malformed chain id or address surfaces as a
// validation error rather than axum's plain 400.
async fn relay_limit(
    State(relay): State<Relay>,
    Path((chain_id, address)): Path<(String, String)>,
) -> Result<impl IntoResponse, RelayError> {
    let chain_id =
        chain_id.parse().map_err(|_| RelayError::InvalidChainId(chain_id.clone()))?;
    let address: Address =
        address.parse().map_err(|_| RelayError::InvalidAddress(address.clone()))?;
    Ok(Json(relay.relay_limit(chain_id, address).await?))
}
