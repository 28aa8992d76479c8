use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::DisplayController;

/// Display status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// True while a display update is running
    pub busy: bool,
}

/// Report whether the display is updating
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Current display status", body = StatusResponse),
    ),
    tag = "Display"
)]
pub async fn handle_status(State(display): State<Arc<DisplayController>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        busy: display.is_busy(),
    })
}
