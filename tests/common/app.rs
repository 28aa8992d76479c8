//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

use inkpress::assets::AssetLoader;
use inkpress::models::AppConfig;
use inkpress::server::{build_router, create_app_state, AppState};
use inkpress::services::{DisplayError, DisplayFrame, DisplaySink, ImageStore};

use super::fixtures;

/// Display sink that keeps every frame it is shown
#[derive(Default)]
pub struct RecordingSink {
    frames: Mutex<Vec<DisplayFrame>>,
}

impl RecordingSink {
    pub fn frames(&self) -> Vec<DisplayFrame> {
        self.frames.lock().unwrap().clone()
    }
}

impl DisplaySink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn show(&self, frame: &DisplayFrame) -> Result<(), DisplayError> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    pub sink: Arc<RecordingSink>,
    /// Gallery directory, removed on drop
    pub gallery: TempDir,
}

impl TestApp {
    /// Create a test app with a small display and a temporary gallery
    pub fn new() -> Self {
        Self::with_config(fixtures::test_config())
    }

    /// Create a test app from a custom config; the gallery dir is replaced
    pub fn with_config(mut config: AppConfig) -> Self {
        let gallery = TempDir::new().expect("Failed to create gallery dir");
        config.gallery.dir = gallery.path().to_path_buf();

        let asset_loader = Arc::new(AssetLoader::new(None));
        let sink = Arc::new(RecordingSink::default());
        let state = create_app_state(asset_loader, config, sink.clone())
            .expect("Failed to create app state");

        // Build router using shared server module (same as production)
        let router = build_router(state.clone());

        Self {
            router,
            state,
            sink,
            gallery,
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.state.store
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// POST a urlencoded form body
    pub async fn post_form(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// POST a multipart body with a single file field
    pub async fn post_file(
        &self,
        path: &str,
        field: &str,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> TestResponse {
        let boundary = "inkpress-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::post(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Upload a photo through the dashboard form
    pub async fn upload(&self, bytes: &[u8]) -> TestResponse {
        self.post_file("/", "file", "photo.jpg", "image/jpeg", bytes)
            .await
    }

    /// Wait until the sink has received at least `count` frames
    pub async fn wait_for_frames(&self, count: usize) -> Vec<DisplayFrame> {
        for _ in 0..200 {
            let frames = self.sink.frames();
            if frames.len() >= count && !self.state.display.is_busy() {
                return frames;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "Expected {count} display frames, got {}",
            self.sink.frames().len()
        );
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
