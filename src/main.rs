//! # Safe Relay
//!
//! A relay service that sponsors transactions for Safe accounts.

use clap::Parser;
use safe_relay::cli::Args;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy(),
        )
        .init();

    Args::parse().run().await
}
