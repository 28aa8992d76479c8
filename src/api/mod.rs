pub mod dashboard;
pub mod gallery;
pub mod status;
pub mod upload;

use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub use dashboard::{handle_dashboard, DashboardView, ImageCard, __path_handle_dashboard};
pub use gallery::{handle_image, handle_reload, ReloadForm, __path_handle_image, __path_handle_reload};
pub use status::{handle_status, StatusResponse, __path_handle_status};
pub use upload::{handle_upload, UploadForm, MAX_UPLOAD_BYTES, __path_handle_upload};

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error message
    pub error: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkpress API",
        description = "Photo quantization and dashboard server for low-color e-paper displays",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        handle_dashboard,
        handle_upload,
        handle_status,
        handle_image,
        handle_reload,
    ),
    components(schemas(StatusResponse, ErrorResponse, ReloadForm, UploadForm)),
    tags(
        (name = "Dashboard", description = "Web interface"),
        (name = "Gallery", description = "Uploading and serving converted images"),
        (name = "Display", description = "Display status and updates")
    )
)]
pub struct ApiDoc;
