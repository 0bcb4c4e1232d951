//! # Relay CLI

use crate::{config::RelayConfig, spawn::try_spawn_with_args};
use alloy::primitives::ChainId;
use clap::Parser;
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};
use url::Url;

/// The relay service sponsors transactions for Safe accounts.
#[derive(Debug, Parser)]
#[command(author, about = "Relay", long_about = None)]
pub struct Args {
    /// The configuration file.
    ///
    /// If missing, a default one will be used and stored in the working directory under
    /// `relay.yaml`.
    #[arg(long, value_name = "CONFIG", env = "RELAY_CONFIG", default_value = "relay.yaml")]
    pub config: PathBuf,
    /// The address to serve on.
    #[arg(long = "http.addr", value_name = "ADDR", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub address: IpAddr,
    /// The port to serve on.
    #[arg(long = "http.port", value_name = "PORT", default_value_t = 3000)]
    pub port: u16,
    /// The rate-limit window in seconds.
    #[arg(long = "throttle.ttl", value_name = "SECONDS")]
    pub throttle_ttl: Option<u64>,
    /// The number of sponsored relays allowed per address inside one window.
    #[arg(long = "throttle.limit", value_name = "NUM")]
    pub throttle_limit: Option<u32>,
    /// The sponsor network endpoint.
    #[arg(long = "sponsor.url", value_name = "URL")]
    pub sponsor_url: Option<Url>,
    /// A sponsor API key for one chain, as `<CHAIN_ID>:<KEY>`.
    #[arg(long = "sponsor.api-key", value_name = "CHAIN_ID:KEY", value_parser = parse_chain_key)]
    pub sponsor_api_keys: Vec<(ChainId, String)>,
    /// The Safe client gateway endpoint.
    #[arg(long = "gateway-url", value_name = "URL", env = "RELAY_GATEWAY_URL")]
    pub gateway_url: Option<Url>,
}

impl Args {
    /// Overrides configuration values with the ones set on the command line.
    pub fn merge_relay_config(self, config: RelayConfig) -> RelayConfig {
        let mut config = config.with_address(self.address).with_port(self.port);
        if let Some(ttl) = self.throttle_ttl {
            config = config.with_throttle_ttl_secs(ttl);
        }
        if let Some(limit) = self.throttle_limit {
            config = config.with_throttle_limit(limit);
        }
        if let Some(url) = self.sponsor_url {
            config = config.with_sponsor_url(url);
        }
        if let Some(url) = self.gateway_url {
            config = config.with_gateway_url(url);
        }
        config.sponsor.api_keys.extend(self.sponsor_api_keys);
        config
    }

    /// Run the relay service until shutdown.
    pub async fn run(self) -> eyre::Result<()> {
        let config_path = self.config.clone();
        let handle = try_spawn_with_args(self, config_path).await?;
        tokio::signal::ctrl_c().await?;
        handle.server.abort();
        Ok(())
    }
}

fn parse_chain_key(value: &str) -> eyre::Result<(ChainId, String)> {
    let (chain_id, key) = value
        .split_once(':')
        .ok_or_else(|| eyre::eyre!("expected `<CHAIN_ID>:<KEY>`, got `{value}`"))?;
    Ok((chain_id.parse()?, key.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_key_pairs_parse() {
        assert_eq!(parse_chain_key("5:abc").unwrap(), (5, "abc".to_owned()));
        assert!(parse_chain_key("nokey").is_err());
        assert!(parse_chain_key("x:abc").is_err());
    }

    #[test]
    fn cli_overrides_the_config_file() {
        let args = Args::parse_from([
            "relay",
            "--http.port",
            "8080",
            "--throttle.limit",
            "1",
            "--sponsor.api-key",
            "5:goerli-key",
        ]);
        let config = args.merge_relay_config(RelayConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.throttle.limit, 1);
        assert_eq!(config.sponsor.api_keys.get(&5).map(String::as_str), Some("goerli-key"));
    }
}
