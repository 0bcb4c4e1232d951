//! Relay configuration.

use crate::constants::{
    DEFAULT_SPONSOR_URL, DEFAULT_THROTTLE_LIMIT, DEFAULT_THROTTLE_TTL_SECS,
};
use alloy::primitives::ChainId;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr},
    path::Path,
};
use url::Url;

/// Relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Rate-limit configuration.
    #[serde(default)]
    pub throttle: ThrottleConfig,
    /// Sponsor network configuration.
    #[serde(default)]
    pub sponsor: SponsorConfig,
    /// The Safe client gateway used to confirm deployed Safes.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: Url,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            throttle: ThrottleConfig::default(),
            sponsor: SponsorConfig::default(),
            gateway_url: default_gateway_url(),
        }
    }
}

impl RelayConfig {
    /// Sets the IP address to serve on.
    pub fn with_address(mut self, address: IpAddr) -> Self {
        self.server.address = address;
        self
    }

    /// Sets the port to serve on.
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Sets the rate-limit window.
    pub fn with_throttle_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.throttle.ttl_secs = ttl_secs;
        self
    }

    /// Sets the relays allowed per address and window.
    pub fn with_throttle_limit(mut self, limit: u32) -> Self {
        self.throttle.limit = limit;
        self
    }

    /// Sets the sponsor endpoint.
    pub fn with_sponsor_url(mut self, url: Url) -> Self {
        self.sponsor.url = url;
        self
    }

    /// Sets the Safe client gateway endpoint.
    pub fn with_gateway_url(mut self, url: Url) -> Self {
        self.gateway_url = url;
        self
    }

    /// Load from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_gateway_url() -> Url {
    "https://safe-client.safe.global".parse().expect("valid url")
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address to serve on.
    pub address: IpAddr,
    /// The port to serve on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::LOCALHOST), port: 3000 }
    }
}

/// Rate-limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Window length in seconds.
    pub ttl_secs: u64,
    /// Relays allowed per address inside one window.
    pub limit: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { ttl_secs: DEFAULT_THROTTLE_TTL_SECS, limit: DEFAULT_THROTTLE_LIMIT }
    }
}

/// Sponsor network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorConfig {
    /// The sponsor endpoint.
    pub url: Url,
    /// Per-chain sponsor API keys.
    #[serde(default, skip_serializing)]
    pub api_keys: HashMap<ChainId, String>,
}

impl Default for SponsorConfig {
    fn default() -> Self {
        Self { url: DEFAULT_SPONSOR_URL.parse().expect("valid url"), api_keys: HashMap::new() }
    }
}
