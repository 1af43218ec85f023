use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::ToSchema;

use crate::errors::{ApiError, DeviceError};
use crate::models::SwitchState;
use crate::services::RealtimeStore;

/// Realtime store node holding the device map.
const DEVICES_PATH: &str = "devices";

#[derive(Clone)]
pub struct DeviceState {
    pub realtime: Arc<dyn RealtimeStore>,
}

pub fn device_router(device_state: DeviceState) -> Router {
    Router::new()
        .route("/devices", get(get_devices))
        .route("/devices/toggleAll", post(toggle_all_devices))
        .route("/devices/:device_id", get(get_device))
        .route("/devices/:device_id/toggle", post(toggle_device))
        .with_state(device_state)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleRequest {
    pub state: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleResponse {
    pub success: bool,
    pub id: String,
    pub state: SwitchState,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleAllResponse {
    pub success: bool,
    pub state: SwitchState,
}

fn parse_state(state: Option<&str>) -> Result<SwitchState, DeviceError> {
    state
        .ok_or(DeviceError::InvalidState)
        .and_then(SwitchState::from_str)
}

#[utoipa::path(
    get,
    path = "/devices",
    tag = "device",
    responses(
        (status = 200, description = "The full device map, empty object when none"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_devices(State(state): State<DeviceState>) -> Result<Json<Value>, ApiError> {
    let devices = state.realtime.get(DEVICES_PATH).await?;

    // An absent node reads as null; the contract is an empty map.
    let devices = if devices.is_null() {
        json!({})
    } else {
        devices
    };

    Ok(Json(devices))
}

#[utoipa::path(
    get,
    path = "/devices/{device_id}",
    tag = "device",
    params(
        ("device_id" = String, Path, description = "Device identifier")
    ),
    responses(
        (status = 200, description = "Map of the id to its state, null when unknown"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_device(
    Path(device_id): Path<String>,
    State(state): State<DeviceState>,
) -> Result<Json<Value>, ApiError> {
    let value = state
        .realtime
        .get(&format!("{DEVICES_PATH}/{device_id}"))
        .await?;

    let mut body = Map::new();
    body.insert(device_id, value);

    Ok(Json(Value::Object(body)))
}

#[utoipa::path(
    post,
    path = "/devices/{device_id}/toggle",
    tag = "device",
    params(
        ("device_id" = String, Path, description = "Device identifier")
    ),
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "State written", body = ToggleResponse),
        (status = 400, description = "State is not ON or OFF"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn toggle_device(
    Path(device_id): Path<String>,
    State(state): State<DeviceState>,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let desired = parse_state(body.state.as_deref())?;

    state
        .realtime
        .set(
            &format!("{DEVICES_PATH}/{device_id}"),
            &json!(desired.as_str()),
        )
        .await?;

    Ok(Json(ToggleResponse {
        success: true,
        id: device_id,
        state: desired,
    }))
}

#[utoipa::path(
    post,
    path = "/devices/toggleAll",
    tag = "device",
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "State written to every known device", body = ToggleAllResponse),
        (status = 400, description = "State is not ON or OFF"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn toggle_all_devices(
    State(state): State<DeviceState>,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<ToggleAllResponse>, ApiError> {
    let desired = parse_state(body.state.as_deref())?;

    let devices = state.realtime.get(DEVICES_PATH).await?;

    // One merge write covers every known device; an empty map is a no-op.
    if let Some(entries) = devices.as_object().filter(|map| !map.is_empty()) {
        let updates: Map<String, Value> = entries
            .keys()
            .map(|id| (id.clone(), json!(desired.as_str())))
            .collect();

        state
            .realtime
            .update(DEVICES_PATH, &Value::Object(updates))
            .await?;
    }

    Ok(Json(ToggleAllResponse {
        success: true,
        state: desired,
    }))
}
