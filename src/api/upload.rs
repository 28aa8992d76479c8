use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{ConversionService, DisplayController, DisplayFrame, ImageStore};

/// Upper bound for uploaded photos
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Multipart upload body
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// JPEG or PNG photo
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Convert an uploaded photo, store it and show it
///
/// The conversion runs before the response; the display update continues
/// in the background. Redirects back to the dashboard.
#[utoipa::path(
    post,
    path = "/",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Stored and queued for display, redirect to /"),
        (status = 400, description = "Missing file or undecodable image", body = super::ErrorResponse),
        (status = 422, description = "Quantization failed", body = super::ErrorResponse),
    ),
    tag = "Gallery"
)]
pub async fn handle_upload(
    State(conversion): State<Arc<ConversionService>>,
    State(store): State<Arc<ImageStore>>,
    State(display): State<Arc<DisplayController>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            upload = Some(bytes);
            break;
        }
    }
    let bytes = upload
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing 'file' field".to_string()))?;

    tracing::info!(bytes = bytes.len(), "Received upload");

    let (name, frame) = tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
        let result = conversion.convert(&bytes)?;
        let name = store.save(&result.png)?;
        Ok((name, DisplayFrame::from_quantized(&result.image)))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    tracing::info!(name = %name, "Stored converted image");
    display.spawn_show(frame);

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, "/")]).into_response())
}
