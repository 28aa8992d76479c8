//! Test fixtures and constants.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use inkpress::models::AppConfig;
use std::io::Cursor;

/// Display size used by the test config
pub const WIDTH: u32 = 24;
pub const HEIGHT: u32 = 16;

/// Small display and a short search so tests stay fast
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.display.width = WIDTH;
    config.display.height = HEIGHT;
    config.optimizer.max_iterations = 20;
    config
}

/// Landscape gradient with a saturated stripe
pub fn photo(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if y * 4 / height == 1 {
            Rgb([220, 40, 30])
        } else {
            Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
            ])
        }
    })
}

pub fn jpeg_photo(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(photo(width, height)), ImageFormat::Jpeg)
}

pub fn png_photo(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(photo(width, height)), ImageFormat::Png)
}

/// Fully transparent PNG
pub fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("Failed to encode fixture");
    buf.into_inner()
}
