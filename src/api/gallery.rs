use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{DisplayController, DisplayFrame, ImageStore};

/// Form body for `/reload`
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReloadForm {
    /// Stored image name, e.g. `img_1700000000.png`
    #[serde(default)]
    pub filename: Option<String>,
}

/// Serve a stored image
#[utoipa::path(
    get,
    path = "/img/{name}",
    params(("name" = String, Path, description = "Stored image name")),
    responses(
        (status = 200, description = "Indexed PNG image"),
        (status = 400, description = "Invalid name", body = super::ErrorResponse),
        (status = 404, description = "No such image", body = super::ErrorResponse),
    ),
    tag = "Gallery"
)]
pub async fn handle_image(
    State(store): State<Arc<ImageStore>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = store.read(&name)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        bytes,
    )
        .into_response())
}

/// Send a stored image to the display again
///
/// Returns as soon as the update is queued.
#[utoipa::path(
    post,
    path = "/reload",
    request_body(content = ReloadForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 204, description = "Display update queued"),
        (status = 400, description = "Missing or invalid filename", body = super::ErrorResponse),
        (status = 404, description = "No such image", body = super::ErrorResponse),
    ),
    tag = "Display"
)]
pub async fn handle_reload(
    State(store): State<Arc<ImageStore>>,
    State(display): State<Arc<DisplayController>>,
    Form(form): Form<ReloadForm>,
) -> Result<StatusCode, ApiError> {
    let name = form
        .filename
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing 'filename' field".to_string()))?;

    let bytes = store.read(&name)?;
    let frame = DisplayFrame::from_png(&bytes).map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(name = %name, "Reloading image");
    display.spawn_show(frame);

    Ok(StatusCode::NO_CONTENT)
}
