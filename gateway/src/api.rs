//! HTTP surface for the display layer: the published state and the one fan
//! command entry point. Nothing else is part of the contract.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::{actuator, state::StateHandle, transport::HttpDevice};

#[derive(Clone)]
pub struct AppState {
    pub state: StateHandle,
    pub device: Arc<HttpDevice>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/state", get(handle_get_state))
        .route("/api/fan", post(handle_set_fan))
        .with_state(app_state)
}

async fn handle_get_state(State(app): State<AppState>) -> impl IntoResponse {
    Json(app.state.view().await)
}

async fn handle_set_fan(
    State(app): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(value) = params.get("value") else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'value' parameter");
    };

    let on = match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => true,
        "off" | "false" | "0" => false,
        _ => return error_response(StatusCode::BAD_REQUEST, "Invalid value. Use 'on' or 'off'"),
    };

    if actuator::set_fan(app.device.as_ref(), &app.state, on)
        .await
        .is_err()
    {
        // Already logged by the actuator path; the toggle stays at its last
        // confirmed position, which the returned error signals to the UI.
        return error_response(StatusCode::BAD_GATEWAY, "Device did not accept fan command");
    }

    Json(app.state.view().await).into_response()
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}
