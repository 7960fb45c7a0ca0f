//! inverterd - Inverter bridge daemon
//!
//! Reads one JSON request per line on stdin, writes one JSON reply per
//! line on stdout, and keeps a single lazily-connected session to the
//! inverter in between. Runs until stdin closes.
//!
//! Usage:
//!   inverterd --host <ADDR> [--protocol UDP|TCP] [--timeout 5] [--retries 20]
//!
//! Logs go to stderr (RUST_LOG controls verbosity); stdout carries only
//! replies.

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inverter_core::create_connector;
use inverterd::{run_bridge, BridgeConfig, Session};

#[tokio::main]
async fn main() -> Result<()> {
    let config = BridgeConfig::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let params = config.connect_params();
    info!(
        host = %params.host,
        port = params.port,
        timeout_s = params.timeout.as_secs(),
        retries = params.retries,
        "inverter bridge starting"
    );

    let connector = create_connector(&config.driver_config())?;
    let session = Session::new(connector, params);

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_bridge(stdin, stdout, session).await?;

    info!("input closed, shutting down");
    Ok(())
}
