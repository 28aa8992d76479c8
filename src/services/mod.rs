pub mod conversion;
pub mod display;
pub mod gallery;
pub mod template_service;

pub use conversion::{Conversion, ConversionError, ConversionService};
pub use display::{DisplayController, DisplayError, DisplayFrame, DisplaySink, FileSink, LogSink};
pub use gallery::{validate_name, GalleryEntry, ImageStore, StoreError};
pub use template_service::{TemplateError, TemplateService};
