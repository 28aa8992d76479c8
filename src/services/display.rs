//! Pushing images to the attached panel.
//!
//! Panel refreshes are slow and the driver is not reentrant, so updates are
//! serialized behind a lock and run on the blocking pool. The dashboard polls
//! [`DisplayController::is_busy`] to show progress.

use lab_dither::QuantizedImage;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::rendering::encode_rgb_png;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Display driver error: {0}")]
    Driver(String),
}

/// Full-resolution RGB frame handed to a [`DisplaySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl DisplayFrame {
    /// Decode a stored PNG (indexed or not)
    pub fn from_png(bytes: &[u8]) -> Result<Self, DisplayError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| DisplayError::Decode(e.to_string()))?
            .to_rgb8();
        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgb: image.into_raw(),
        })
    }

    pub fn from_quantized(image: &QuantizedImage) -> Self {
        Self {
            width: image.width() as u32,
            height: image.height() as u32,
            rgb: image.to_rgb(),
        }
    }
}

/// Output device for frames
///
/// `show` blocks until the panel has finished refreshing.
pub trait DisplaySink: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn show(&self, frame: &DisplayFrame) -> Result<(), DisplayError>;
}

/// Writes each frame to a PNG file, for panels driven by an external process
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DisplaySink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn show(&self, frame: &DisplayFrame) -> Result<(), DisplayError> {
        let png = encode_rgb_png(frame.width, frame.height, &frame.rgb)
            .map_err(|e| DisplayError::Encode(e.to_string()))?;
        let tmp = self.path.with_extension("png.tmp");
        fs::write(&tmp, png)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "Wrote display frame");
        Ok(())
    }
}

/// Only logs frames; used when no panel is attached
#[derive(Debug, Default)]
pub struct LogSink;

impl DisplaySink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn show(&self, frame: &DisplayFrame) -> Result<(), DisplayError> {
        tracing::info!(width = frame.width, height = frame.height, "Display update");
        Ok(())
    }
}

/// Serializes updates to a single sink
#[derive(Clone)]
pub struct DisplayController {
    sink: Arc<dyn DisplaySink>,
    lock: Arc<Mutex<()>>,
}

impl DisplayController {
    pub fn new(sink: Arc<dyn DisplaySink>) -> Self {
        Self {
            sink,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// True while an update holds the panel
    pub fn is_busy(&self) -> bool {
        self.lock.try_lock().is_err()
    }

    /// Show `frame`, waiting for any update in progress first
    pub async fn show(&self, frame: DisplayFrame) -> Result<(), DisplayError> {
        let _guard = self.lock.lock().await;
        let sink = self.sink.clone();
        tokio::task::spawn_blocking(move || sink.show(&frame))
            .await
            .map_err(|e| DisplayError::Driver(e.to_string()))?
    }

    /// Show `frame` in the background; failures are logged
    pub fn spawn_show(&self, frame: DisplayFrame) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(e) = controller.show(frame).await {
                tracing::warn!(%e, sink = controller.sink_name(), "Display update failed");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    struct SlowSink {
        delay: Duration,
        shown: AtomicUsize,
    }

    impl DisplaySink for SlowSink {
        fn name(&self) -> &str {
            "slow"
        }

        fn show(&self, _frame: &DisplayFrame) -> Result<(), DisplayError> {
            std::thread::sleep(self.delay);
            self.shown.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingSink;

    impl DisplaySink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        fn show(&self, _frame: &DisplayFrame) -> Result<(), DisplayError> {
            Err(DisplayError::Driver("panel unplugged".to_string()))
        }
    }

    fn frame() -> DisplayFrame {
        DisplayFrame {
            width: 2,
            height: 1,
            rgb: vec![0, 0, 0, 255, 255, 255],
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_busy_while_updating() {
        let sink = Arc::new(SlowSink {
            delay: Duration::from_millis(300),
            shown: AtomicUsize::new(0),
        });
        let controller = DisplayController::new(sink.clone());
        assert!(!controller.is_busy());

        let handle = controller.spawn_show(frame());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(controller.is_busy());

        handle.await.unwrap();
        assert!(!controller.is_busy());
        assert_eq!(sink.shown.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_updates_are_serialized() {
        let sink = Arc::new(SlowSink {
            delay: Duration::from_millis(50),
            shown: AtomicUsize::new(0),
        });
        let controller = DisplayController::new(sink.clone());

        let a = controller.spawn_show(frame());
        let b = controller.spawn_show(frame());
        a.await.unwrap();
        b.await.unwrap();
        assert_eq!(sink.shown.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_show_propagates_sink_error() {
        let controller = DisplayController::new(Arc::new(FailingSink));
        let result = controller.show(frame()).await;
        assert!(matches!(result, Err(DisplayError::Driver(_))));
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_file_sink_writes_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("panel.png");
        FileSink::new(&path).show(&frame()).unwrap();

        let written = DisplayFrame::from_png(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(written, frame());
    }

    #[test]
    fn test_from_png_rejects_garbage() {
        assert!(matches!(
            DisplayFrame::from_png(b"nope"),
            Err(DisplayError::Decode(_))
        ));
    }
}
