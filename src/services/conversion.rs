use lab_dither::{PaletteError, QuantizeError, QuantizedImage, Quantizer};
use thiserror::Error;

use crate::error::RenderError;
use crate::models::AppConfig;
use crate::rendering::{decode, encode_indexed_png, prepare, PrepareOptions};

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Quantize(#[from] QuantizeError),
}

/// Result of converting one photo
pub struct Conversion {
    /// Indexed PNG ready to store or send to a panel
    pub png: Vec<u8>,
    pub image: QuantizedImage,
}

/// Photo to indexed PNG pipeline: decode, fit to the panel, quantize, encode
#[derive(Debug, Clone)]
pub struct ConversionService {
    quantizer: Quantizer,
    options: PrepareOptions,
}

impl ConversionService {
    pub fn new(quantizer: Quantizer, options: PrepareOptions) -> Self {
        Self { quantizer, options }
    }

    /// Build from the display, palette, dither and optimizer config sections
    pub fn from_config(config: &AppConfig) -> Result<Self, PaletteError> {
        Ok(Self::new(
            config.quantizer()?,
            PrepareOptions::from(&config.display),
        ))
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn options(&self) -> &PrepareOptions {
        &self.options
    }

    /// Convert encoded image bytes (JPEG or PNG)
    ///
    /// CPU bound; call from a blocking context.
    pub fn convert(&self, bytes: &[u8]) -> Result<Conversion, ConversionError> {
        let start = std::time::Instant::now();
        let source = decode(bytes)?;
        let prepared = prepare(source, &self.options)?;

        let image = self
            .quantizer
            .quantize(&prepared.pixels, prepared.width, prepared.height)?;
        let png = encode_indexed_png(&image)?;

        match image.report() {
            Some(report) => tracing::info!(
                width = prepared.width,
                height = prepared.height,
                loss = report.loss,
                initial_loss = report.initial_loss,
                evaluations = report.evaluations,
                status = ?report.status,
                bytes = png.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Converted image"
            ),
            None => tracing::info!(
                width = prepared.width,
                height = prepared.height,
                bytes = png.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Converted image with fixed parameters"
            ),
        }

        Ok(Conversion { png, image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn small_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.display.width = 12;
        config.display.height = 8;
        config.optimizer.max_iterations = 10;
        config
    }

    fn jpeg_bytes() -> Vec<u8> {
        let img = RgbImage::from_fn(30, 20, |x, y| Rgb([(x * 8) as u8, (y * 12) as u8, 90]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Jpeg)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_convert_produces_panel_sized_indexed_png() {
        let service = ConversionService::from_config(&small_config()).unwrap();
        let conversion = service.convert(&jpeg_bytes()).unwrap();

        assert_eq!(conversion.image.width(), 12);
        assert_eq!(conversion.image.height(), 8);
        assert!(conversion.image.indices().iter().all(|&i| i < 7));
        assert!(conversion.image.report().is_some());
        assert_eq!(&conversion.png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&conversion.png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 8));
    }

    #[test]
    fn test_convert_without_search() {
        let mut config = small_config();
        config.optimizer.enabled = false;
        let service = ConversionService::from_config(&config).unwrap();
        let conversion = service.convert(&jpeg_bytes()).unwrap();

        assert!(conversion.image.report().is_none());
    }

    #[test]
    fn test_convert_rejects_garbage() {
        let service = ConversionService::from_config(&small_config()).unwrap();
        assert!(matches!(
            service.convert(b"definitely not a photo"),
            Err(ConversionError::Render(RenderError::Decode(_)))
        ));
    }

    #[test]
    fn test_invalid_strength_surfaces() {
        let mut config = small_config();
        config.dither.strength = f32::NAN;
        let service = ConversionService::from_config(&config).unwrap();
        assert!(matches!(
            service.convert(&jpeg_bytes()),
            Err(ConversionError::Quantize(QuantizeError::InvalidStrength(_)))
        ));
    }
}
