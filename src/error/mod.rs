//! Relay error taxonomy and its HTTP mapping.

use crate::{policy::RejectionReason, sponsor::SponsorError, throttle::StorageError};
use alloy::primitives::ChainId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Any error a relay operation can surface.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The chain id has no configured deployments or sponsor.
    #[error("chain {0} is not supported")]
    UnsupportedChain(ChainId),
    /// A chain id path segment that is not a number.
    #[error("invalid chain id: {0}")]
    InvalidChainId(String),
    /// An address that does not parse.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// The policy refused the transaction.
    #[error(transparent)]
    Validation(#[from] RejectionReason),
    /// An address in the request has exhausted its quota.
    #[error("Relay limit reached")]
    RateLimitExceeded,
    /// The sponsor network rejected or failed the call.
    #[error(transparent)]
    Sponsor(#[from] SponsorError),
    /// The throttle store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Anything else.
    #[error(transparent)]
    Internal(#[from] eyre::Error),
}

impl RelayError {
    /// The HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedChain(_)
            | Self::InvalidChainId(_)
            | Self::InvalidAddress(_)
            | Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::Sponsor(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message exposed to clients.
    ///
    /// Upstream failures keep their detail in the logs and surface as a
    /// generic message.
    pub fn message(&self) -> String {
        match self {
            Self::Sponsor(_) | Self::Storage(_) | Self::Internal(_) => "Relay failed".to_owned(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(err = %self, "relay request failed");
        }
        (status, Json(ErrorBody { message: self.message() })).into_response()
    }
}
