//! Row-major CIELAB raster and the sRGB <-> CIELAB adapter.

use super::error::ColorError;
use super::lab::Lab;
use super::linear_rgb::LinearRgb;
use super::srgb::Srgb;

/// A height x width grid of [`Lab`] pixels in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabImage {
    width: usize,
    height: usize,
    pixels: Vec<Lab>,
}

impl LabImage {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// [`ColorError::Dimensions`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Lab>) -> Result<Self, ColorError> {
        if pixels.len() != width * height {
            return Err(ColorError::Dimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Lab) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Lab] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Lab] {
        &mut self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Lab {
        self.pixels[y * self.width + x]
    }

    /// Apply `f` to every pixel, producing a new image of the same size.
    pub fn map(&self, f: impl Fn(Lab) -> Lab) -> LabImage {
        LabImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }
}

/// Convert a gamma-encoded sRGB raster into CIELAB.
///
/// Channels are expected in 0.0..=1.0 (use [`Srgb::from_u8`] for 8-bit
/// data). Nothing is clamped: a non-finite or out-of-range channel is an
/// input error.
///
/// # Errors
///
/// - [`ColorError::Dimensions`] if `pixels.len() != width * height`
/// - [`ColorError::InputDomain`] for the first invalid channel found
///
/// # Example
///
/// ```
/// use lab_dither::{to_uniform_space, Srgb};
///
/// let image = to_uniform_space(&[Srgb::from_u8(255, 255, 255)], 1, 1).unwrap();
/// assert!((image.get(0, 0).l - 100.0).abs() < 1e-3);
/// ```
pub fn to_uniform_space(pixels: &[Srgb], width: usize, height: usize) -> Result<LabImage, ColorError> {
    if pixels.len() != width * height {
        return Err(ColorError::Dimensions {
            width,
            height,
            len: pixels.len(),
        });
    }

    let mut lab = Vec::with_capacity(pixels.len());
    for (index, &pixel) in pixels.iter().enumerate() {
        for (channel, value) in ["r", "g", "b"].into_iter().zip(pixel.channels()) {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ColorError::InputDomain {
                    index,
                    channel,
                    value,
                });
            }
        }
        lab.push(Lab::from(LinearRgb::from(pixel)));
    }

    Ok(LabImage {
        width,
        height,
        pixels: lab,
    })
}

/// Convert a CIELAB raster back to sRGB.
///
/// Colors outside the sRGB gamut are clamped per channel.
pub fn from_uniform_space(image: &LabImage) -> Vec<Srgb> {
    image
        .pixels()
        .iter()
        .map(|&lab| Srgb::from(LinearRgb::from(lab)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_gray_levels() {
        let pixels: Vec<Srgb> = (0..=255u8).map(|v| Srgb::from_u8(v, v, v)).collect();
        let lab = to_uniform_space(&pixels, 16, 16).unwrap();
        let back = from_uniform_space(&lab);

        for (orig, round) in pixels.iter().zip(&back) {
            assert_eq!(orig.to_bytes(), round.to_bytes());
        }
    }

    #[test]
    fn test_round_trip_colors() {
        let pixels = [
            Srgb::from_u8(255, 0, 0),
            Srgb::from_u8(12, 200, 90),
            Srgb::from_u8(30, 40, 250),
            Srgb::from_u8(250, 220, 10),
        ];
        let lab = to_uniform_space(&pixels, 2, 2).unwrap();
        let back = from_uniform_space(&lab);
        for (orig, round) in pixels.iter().zip(&back) {
            for (a, b) in orig.channels().iter().zip(round.channels()) {
                assert!((a - b).abs() < 1e-4, "{orig:?} -> {round:?}");
            }
        }
    }

    #[test]
    fn test_rejects_non_finite() {
        let pixels = [Srgb::new(0.5, 0.5, 0.5), Srgb::new(0.5, f32::NAN, 0.5)];
        let err = to_uniform_space(&pixels, 2, 1).unwrap_err();
        match err {
            ColorError::InputDomain { index, channel, .. } => {
                assert_eq!(index, 1);
                assert_eq!(channel, "g");
            }
            other => panic!("Expected InputDomain, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        let pixels = [Srgb::new(1.5, 0.0, 0.0)];
        assert!(matches!(
            to_uniform_space(&pixels, 1, 1),
            Err(ColorError::InputDomain { channel: "r", .. })
        ));

        let pixels = [Srgb::new(0.0, 0.0, -0.01)];
        assert!(matches!(
            to_uniform_space(&pixels, 1, 1),
            Err(ColorError::InputDomain { channel: "b", .. })
        ));
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let pixels = vec![Srgb::new(0.0, 0.0, 0.0); 5];
        assert_eq!(
            to_uniform_space(&pixels, 2, 2).unwrap_err(),
            ColorError::Dimensions {
                width: 2,
                height: 2,
                len: 5
            }
        );
        assert!(LabImage::new(3, 1, vec![Lab::default(); 2]).is_err());
    }

    #[test]
    fn test_get_is_row_major() {
        let pixels = (0..6).map(|i| Lab::new(i as f32, 0.0, 0.0)).collect();
        let image = LabImage::new(3, 2, pixels).unwrap();
        assert_eq!(image.get(2, 0).l, 2.0);
        assert_eq!(image.get(0, 1).l, 3.0);
        assert_eq!(image.get(2, 1).l, 5.0);
    }
}
