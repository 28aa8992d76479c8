use axum::{extract::State, response::Html};
use serde::Serialize;
use std::sync::Arc;

use crate::assets::DASHBOARD_TEMPLATE;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{DisplayController, GalleryEntry, ImageStore, TemplateService};

/// One gallery tile
#[derive(Debug, Serialize)]
pub struct ImageCard {
    pub name: String,
    /// Unix seconds
    pub modified: i64,
    pub size: u64,
}

impl From<GalleryEntry> for ImageCard {
    fn from(entry: GalleryEntry) -> Self {
        Self {
            name: entry.name,
            modified: entry.modified.timestamp(),
            size: entry.size,
        }
    }
}

/// Template context for the dashboard page
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub busy: bool,
    pub images: Vec<ImageCard>,
    /// Palette entries as `#rrggbb`
    pub palette: Vec<String>,
    pub display: String,
    pub sink: String,
    pub version: &'static str,
}

/// Dashboard page
///
/// Upload form, display status and the stored images, newest first.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Dashboard HTML page"),
    ),
    tag = "Dashboard"
)]
pub async fn handle_dashboard(
    State(config): State<Arc<AppConfig>>,
    State(store): State<Arc<ImageStore>>,
    State(display): State<Arc<DisplayController>>,
    State(templates): State<Arc<TemplateService>>,
) -> Result<Html<String>, ApiError> {
    let images = store.list()?.into_iter().map(ImageCard::from).collect();
    let palette = config
        .palette
        .build()
        .map(|p| p.to_srgb().iter().map(ToString::to_string).collect())
        .unwrap_or_default();

    let view = DashboardView {
        busy: display.is_busy(),
        images,
        palette,
        display: format!("{}x{}", config.display.width, config.display.height),
        sink: display.sink_name().to_string(),
        version: env!("CARGO_PKG_VERSION"),
    };

    let html = templates
        .render(DASHBOARD_TEMPLATE, &view)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Html(html))
}
