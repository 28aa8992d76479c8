//! PNG output for quantized images.
//!
//! Indexed files always carry the full 256-entry PLTE chunk so that index
//! values stay valid for any palette size.

use std::io::Cursor;

use lab_dither::QuantizedImage;

use crate::error::RenderError;

/// Encode as an 8-bit indexed PNG with a 768-byte palette.
pub fn encode_indexed_png(image: &QuantizedImage) -> Result<Vec<u8>, RenderError> {
    let (width, height) = png_dimensions(image.width(), image.height())?;
    encode(
        width,
        height,
        png::ColorType::Indexed,
        Some(image.palette_table()),
        image.indices(),
    )
}

/// Encode a packed RGB8 buffer.
pub fn encode_rgb_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    if rgb.len() != width as usize * height as usize * 3 {
        return Err(RenderError::PngEncode(format!(
            "expected {} bytes for {width}x{height} RGB, got {}",
            width as usize * height as usize * 3,
            rgb.len()
        )));
    }
    encode(width, height, png::ColorType::Rgb, None, rgb)
}

fn png_dimensions(width: usize, height: usize) -> Result<(u32, u32), RenderError> {
    let w = u32::try_from(width).unwrap_or(u32::MAX);
    let h = u32::try_from(height).unwrap_or(u32::MAX);
    if width == 0 || height == 0 || w == u32::MAX || h == u32::MAX {
        return Err(RenderError::UnsupportedDimensions {
            width: w,
            height: h,
        });
    }
    Ok((w, h))
}

fn encode(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    plte: Option<Vec<u8>>,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
