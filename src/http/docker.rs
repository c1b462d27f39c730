//! `POST /docker-state`

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::container::ContainerError;
use crate::http::response::INTERNAL_ERROR;
use crate::http::server::AppState;

/// Request body. Missing fields read as empty strings and fail validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainerStateRequest {
    pub container: String,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContainerStateResponse {
    pub success: bool,
    pub message: String,
}

pub async fn set_container_state(
    State(state): State<AppState>,
    Json(body): Json<ContainerStateRequest>,
) -> (StatusCode, Json<ContainerStateResponse>) {
    match state.containers.apply(&body.container, &body.state).await {
        Ok(command) => (
            StatusCode::OK,
            Json(ContainerStateResponse {
                success: true,
                message: format!("set container {} to {} success", command.container, command.action),
            }),
        ),
        Err(e) => {
            let (status, message) = match &e {
                ContainerError::UnknownContainer(_) => (StatusCode::NOT_FOUND, e.to_string()),
                ContainerError::UnknownState(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                ContainerError::Remote(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string()),
            };
            (
                status,
                Json(ContainerStateResponse {
                    success: false,
                    message,
                }),
            )
        }
    }
}
