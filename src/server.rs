//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::{self, ApiDoc, ReloadForm, StatusResponse, MAX_UPLOAD_BYTES};
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{
    ConversionService, DisplayController, DisplaySink, ImageStore, TemplateService,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub conversion: Arc<ConversionService>,
    pub store: Arc<ImageStore>,
    pub display: Arc<DisplayController>,
    pub templates: Arc<TemplateService>,
}

/// Create application state from a loaded config and a display sink.
pub fn create_app_state(
    asset_loader: Arc<AssetLoader>,
    config: AppConfig,
    sink: Arc<dyn DisplaySink>,
) -> anyhow::Result<AppState> {
    let conversion = ConversionService::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Invalid palette configuration: {e}"))?;
    let store = ImageStore::open(&config.gallery.dir)
        .map_err(|e| anyhow::anyhow!("Failed to open gallery directory: {e}"))?;
    let templates = TemplateService::new(&asset_loader)?;

    tracing::info!(
        sink = sink.name(),
        palette = conversion.quantizer().palette().len(),
        optimize = config.optimizer.enabled,
        "Application state ready"
    );

    Ok(AppState {
        config: Arc::new(config),
        conversion: Arc::new(conversion),
        store: Arc::new(store),
        display: Arc::new(DisplayController::new(sink)),
        templates: Arc::new(templates),
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(handle_dashboard).post(handle_upload))
        .route("/status", get(handle_status))
        .route("/reload", post(handle_reload))
        .route("/img/:name", get(handle_image))
        // OpenAPI document
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_dashboard(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    api::handle_dashboard(
        State(state.config),
        State(state.store),
        State(state.display),
        State(state.templates),
    )
    .await
}

async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    api::handle_upload(
        State(state.conversion),
        State(state.store),
        State(state.display),
        multipart,
    )
    .await
}

async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    api::handle_status(State(state.display)).await
}

async fn handle_reload(
    State(state): State<AppState>,
    form: Form<ReloadForm>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_reload(State(state.store), State(state.display), form).await
}

async fn handle_image(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Response, ApiError> {
    api::handle_image(State(state.store), path).await
}
