//! Relay spawn utilities.

use crate::{
    cli::Args,
    config::RelayConfig,
    relay::Relay,
    rpc::router,
    safe_info::GatewaySafeInfo,
    sponsor::GelatoSponsor,
    throttle::{InMemoryThrottleStore, RelayLimiter},
};
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Timeout applied to sponsor and gateway requests.
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(30);

/// Context returned once the relay is launched.
#[derive(Debug)]
pub struct RelayHandle {
    /// The socket address to which the server is bound.
    pub local_addr: SocketAddr,
    /// Handle to the HTTP server task.
    pub server: JoinHandle<std::io::Result<()>>,
}

impl RelayHandle {
    /// Returns the url to the http server.
    pub fn http_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }
}

/// Attempts to spawn the relay service using CLI arguments and a configuration file.
pub async fn try_spawn_with_args<P: AsRef<Path>>(
    args: Args,
    config_path: P,
) -> eyre::Result<RelayHandle> {
    let config = if !config_path.as_ref().exists() {
        let config = args.merge_relay_config(RelayConfig::default());
        config.save_to_file(&config_path)?;
        config
    } else {
        // File exists: load and override with CLI values.
        args.merge_relay_config(RelayConfig::load_from_file(&config_path)?)
    };

    try_spawn(config).await
}

/// Spawns the relay service using the provided [`RelayConfig`].
pub async fn try_spawn(config: RelayConfig) -> eyre::Result<RelayHandle> {
    let client = reqwest::Client::builder().timeout(OUTBOUND_TIMEOUT).build()?;

    let limiter = RelayLimiter::new(
        Arc::new(InMemoryThrottleStore::new()),
        config.throttle.ttl_secs,
        config.throttle.limit,
    );
    let sponsor =
        GelatoSponsor::new(client.clone(), config.sponsor.url, config.sponsor.api_keys);
    let safe_info = GatewaySafeInfo::new(client, config.gateway_url);
    let relay = Relay::new(limiter, Arc::new(sponsor), Arc::new(safe_info));

    let app = router(relay).layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive());

    let listener =
        TcpListener::bind(SocketAddr::new(config.server.address, config.server.port)).await?;
    let local_addr = listener.local_addr()?;
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    info!(%local_addr, "Started relay service");

    Ok(RelayHandle { local_addr, server })
}
