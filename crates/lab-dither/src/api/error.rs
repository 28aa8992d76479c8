//! Unified error type for the quantization pipeline.

use thiserror::Error;

use crate::adjust::OutOfBounds;
use crate::color::ColorError;
use crate::optimize::InvalidBounds;
use crate::palette::PaletteError;

/// Everything [`Quantizer`](crate::Quantizer) can reject.
///
/// Non-convergence of the parameter search is not an error; see
/// [`Convergence`](crate::Convergence).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantizeError {
    /// Input pixel outside the adapter's domain
    #[error(transparent)]
    Color(#[from] ColorError),
    /// Palette could not be built
    #[error(transparent)]
    Palette(#[from] PaletteError),
    /// Manually supplied parameter outside its declared range
    #[error("adjustment parameter {name} = {value} is outside [{min}, {max}]")]
    BoundsViolation {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Search bounds are malformed
    #[error(transparent)]
    InvalidBounds(#[from] InvalidBounds),
    /// Pixel buffer length does not match `width * height`
    #[error("pixel buffer has {len} entries, expected {width}x{height}")]
    Dimensions {
        width: usize,
        height: usize,
        len: usize,
    },
    /// Dithering strength is NaN or infinite
    #[error("dithering strength must be finite, got {0}")]
    InvalidStrength(f32),
}

impl From<OutOfBounds> for QuantizeError {
    fn from(err: OutOfBounds) -> Self {
        QuantizeError::BoundsViolation {
            name: err.name,
            value: err.value,
            min: err.min,
            max: err.max,
        }
    }
}
