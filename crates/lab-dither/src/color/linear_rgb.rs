//! Linear RGB color type
//!
//! Linear RGB is the intermediate between gamma-encoded sRGB and CIE XYZ.
//! It is only used on the way into and out of CIELAB.

use super::gamma::srgb_to_linear;
use super::srgb::Srgb;

/// A color in linear RGB color space.
///
/// Values are typically in the range 0.0..=1.0, but CIELAB colors outside
/// the sRGB gamut convert to values beyond this range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f32,
    /// Green channel (linear light intensity)
    pub g: f32,
    /// Blue channel (linear light intensity)
    pub b: f32,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r),
            g: srgb_to_linear(srgb.g),
            b: srgb_to_linear(srgb.b),
        }
    }
}
