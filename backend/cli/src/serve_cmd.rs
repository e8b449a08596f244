//! CLI Serve Command
//!
//! Validates the config, wires the detector, matcher and denylist, and runs
//! the gateway until Ctrl-C.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use tracing::info;

use platescan_config::{ensure_valid, PlateScanConfig};
use platescan_gateway::{start_server, DenylistReloader, GatewayState};
use platescan_ocr::build_detector;

pub async fn run(config: PlateScanConfig) -> Result<()> {
    ensure_valid(&config)?;
    let addr = listen_addr(&config)?;

    info!(
        port = addr.port(),
        bind = %addr.ip(),
        provider = ?config.ocr.provider,
        "Starting platescan"
    );

    let detector = build_detector(&config.ocr).await;
    let state = GatewayState::from_config(&config, detector).await?;

    let reloader = DenylistReloader::new(config.denylist.clone(), state.denylist.clone());
    if !reloader.watch()? {
        info!("Denylist hot reload disabled");
    }

    start_server(addr, config.server.body_limit_bytes(), state).await
}

fn listen_addr(config: &PlateScanConfig) -> Result<SocketAddr> {
    let bind = config.server.bind();
    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("server.bind must be an IP address, got {bind:?}"))?;
    Ok(SocketAddr::new(ip, config.server.port()))
}
