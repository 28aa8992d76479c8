//! Decoding and fitting source photos to the panel.

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use lab_dither::Srgb;

use crate::error::RenderError;
use crate::models::DisplayConfig;

/// Target geometry for [`prepare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepareOptions {
    pub width: u32,
    pub height: u32,
    /// Turn portrait sources sideways when the panel is landscape
    pub rotate_portrait: bool,
}

impl From<&DisplayConfig> for PrepareOptions {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            width: display.width,
            height: display.height,
            rotate_portrait: display.rotate_portrait,
        }
    }
}

/// Opaque sRGB raster at panel resolution.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Srgb>,
}

/// Decode a JPEG or PNG file.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, RenderError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Rotate, scale and center-crop `image` to exactly the target size, then
/// flatten any transparency onto white.
pub fn prepare(image: DynamicImage, options: &PrepareOptions) -> Result<PreparedImage, RenderError> {
    if options.width == 0 || options.height == 0 {
        return Err(RenderError::UnsupportedDimensions {
            width: options.width,
            height: options.height,
        });
    }
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::UnsupportedDimensions { width, height });
    }

    let landscape_panel = options.width >= options.height;
    let image = if options.rotate_portrait && landscape_panel && height > width {
        tracing::debug!(width, height, "Rotating portrait source");
        image.rotate90()
    } else {
        image
    };

    let resized = image.resize_to_fill(options.width, options.height, FilterType::Lanczos3);
    let rgba = resized.to_rgba8();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            Srgb::from_u8(over_white(r, a), over_white(g, a), over_white(b, a))
        })
        .collect();

    Ok(PreparedImage {
        width: options.width as usize,
        height: options.height as usize,
        pixels,
    })
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u16, alpha as u16);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}
