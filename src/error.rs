use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lab_dither::QuantizeError;
use serde_json::json;
use thiserror::Error;

use crate::services::{ConversionError, StoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid image name: {0}")]
    InvalidName(String),

    #[error("Not found")]
    NotFound,

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Quantization error: {0}")]
    Quantize(#[from] QuantizeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConversionError> for ApiError {
    fn from(e: ConversionError) -> Self {
        match e {
            ConversionError::Render(e) => ApiError::Render(e),
            ConversionError::Quantize(e) => ApiError::Quantize(e),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidName(name) => ApiError::InvalidName(name),
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Decode(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidName(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Render(RenderError::Decode(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Quantize(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
