mod device;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;

use crate::device::SimDevice;

#[derive(Clone)]
struct AppState {
    device: Arc<Mutex<SimDevice>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let quirks = std::env::var("SIM_QUIRKS").is_ok_and(|value| value == "1");
    let port = std::env::var("SIM_HTTP_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(9090);

    let app_state = AppState {
        device: Arc::new(Mutex::new(SimDevice::new(quirks))),
    };

    let app = Router::new()
        .route("/status", get(handle_status))
        .route("/fan/on", post(handle_fan_on))
        .route("/fan/off", post(handle_fan_off))
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind simulator at {addr}"))?;

    info!("simulated device on http://{addr} (quirks: {quirks})");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_status(State(app): State<AppState>) -> String {
    app.device.lock().await.sample()
}

async fn handle_fan_on(State(app): State<AppState>) -> &'static str {
    app.device.lock().await.set_fan(true);
    info!("fan switched on");
    "OK"
}

async fn handle_fan_off(State(app): State<AppState>) -> &'static str {
    app.device.lock().await.set_fan(false);
    info!("fan switched off");
    "OK"
}
