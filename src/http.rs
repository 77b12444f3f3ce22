use crate::catalogue::DeviceCatalogue;
use crate::domain::{AdminState, OperatingState, UnknownStateError};
use crate::gateway::{CommandGateway, GatewayError};
use crate::metadata::DeviceRef;
use axum::extract::{Path, State};
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use std::sync::Arc;
use thiserror::Error;

pub fn router(gateway: Arc<CommandGateway>) -> Router {
    Router::new()
        .route("/api/v1/device", get(devices))
        .route("/api/v1/device/{id}", get(device))
        .route("/api/v1/device/name/{name}", get(device_by_name))
        .route("/api/v1/device/{id}/command/{command_id}", get(get_command).put(put_command))
        .route("/api/v1/device/{id}/opstate/{state}", put(operating_state))
        .route("/api/v1/device/name/{name}/opstate/{state}", put(operating_state_by_name))
        .route("/api/v1/device/{id}/adminstate/{state}", put(admin_state))
        .route("/api/v1/device/name/{name}/adminstate/{state}", put(admin_state_by_name))
        .with_state(gateway)
}

fn host(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty())
        .ok_or(ApiError::MissingHost)
}

async fn devices(State(gateway): State<Arc<CommandGateway>>, headers: HeaderMap) -> Result<Json<Vec<DeviceCatalogue>>, ApiError> {
    Ok(Json(gateway.devices(host(&headers)?).await?))
}

async fn device(State(gateway): State<Arc<CommandGateway>>, Path(id): Path<String>, headers: HeaderMap) -> Result<Json<DeviceCatalogue>, ApiError> {
    Ok(Json(gateway.device(&id, host(&headers)?).await?))
}

async fn device_by_name(
    State(gateway): State<Arc<CommandGateway>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeviceCatalogue>, ApiError> {
    Ok(Json(gateway.device_by_name(&name, host(&headers)?).await?))
}

async fn get_command(State(gateway): State<Arc<CommandGateway>>, Path((id, command_id)): Path<(String, String)>) -> Result<String, ApiError> {
    Ok(gateway.get_command(&id, &command_id).await?)
}

async fn put_command(
    State(gateway): State<Arc<CommandGateway>>,
    Path((id, command_id)): Path<(String, String)>,
    body: String,
) -> Result<String, ApiError> {
    Ok(gateway.put_command(&id, &command_id, &body).await?)
}

async fn operating_state(State(gateway): State<Arc<CommandGateway>>, Path((id, state)): Path<(String, String)>) -> Result<StatusCode, ApiError> {
    let state = state.parse::<OperatingState>()?;
    gateway.set_operating_state(DeviceRef::Id(&id), state).await?;
    Ok(StatusCode::OK)
}

async fn operating_state_by_name(
    State(gateway): State<Arc<CommandGateway>>,
    Path((name, state)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let state = state.parse::<OperatingState>()?;
    gateway.set_operating_state(DeviceRef::Name(&name), state).await?;
    Ok(StatusCode::OK)
}

async fn admin_state(State(gateway): State<Arc<CommandGateway>>, Path((id, state)): Path<(String, String)>) -> Result<StatusCode, ApiError> {
    let state = state.parse::<AdminState>()?;
    gateway.set_admin_state(DeviceRef::Id(&id), state).await?;
    Ok(StatusCode::OK)
}

async fn admin_state_by_name(
    State(gateway): State<Arc<CommandGateway>>,
    Path((name, state)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let state = state.parse::<AdminState>()?;
    gateway.set_admin_state(DeviceRef::Name(&name), state).await?;
    Ok(StatusCode::OK)
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    InvalidState(#[from] UnknownStateError),
    #[error("missing or unreadable Host header")]
    MissingHost,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Gateway(GatewayError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Gateway(GatewayError::Locked { .. }) => StatusCode::LOCKED,
            ApiError::Gateway(GatewayError::Service(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidState(_) | ApiError::MissingHost => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
