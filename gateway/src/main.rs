mod actuator;
mod api;
mod error;
mod poller;
mod state;
mod transport;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use airmon_common::GatewayConfig;

use crate::{api::AppState, poller::Poller, state::StateHandle, transport::HttpDevice};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = config_from_env();
    let device = Arc::new(HttpDevice::new(&config)?);
    let state = StateHandle::new();

    let poller = Poller::spawn(
        device.clone(),
        state.clone(),
        Duration::from_millis(config.poll_interval_ms),
    );

    let app = api::router(AppState {
        state,
        device,
    });

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind gateway server at {addr}"))?;

    info!(
        "gateway listening on http://{addr}, polling {} every {} ms",
        config.device_base_url, config.poll_interval_ms
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.stop().await;
    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn config_from_env() -> GatewayConfig {
    let mut config = GatewayConfig::default();

    if let Ok(url) = std::env::var("DEVICE_BASE_URL") {
        config.device_base_url = url;
    }
    config.poll_interval_ms = env_parsed("POLL_INTERVAL_MS").unwrap_or(config.poll_interval_ms);
    config.request_timeout_ms =
        env_parsed("REQUEST_TIMEOUT_MS").unwrap_or(config.request_timeout_ms);
    config.http_port = env_parsed("GATEWAY_HTTP_PORT").unwrap_or(config.http_port);

    config
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}
