//! Errors raised when pixels enter the uniform color space.

use thiserror::Error;

/// Error type for the color space adapter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// A channel value is non-finite or outside 0.0..=1.0.
    #[error("pixel {index} channel {channel} has value {value}, expected a finite value in 0.0..=1.0")]
    InputDomain {
        /// Row-major pixel index
        index: usize,
        /// Channel name ("r", "g" or "b")
        channel: &'static str,
        /// The offending value
        value: f32,
    },
    /// Pixel buffer length does not match the stated dimensions.
    #[error("pixel buffer has {len} entries, expected {width}x{height}")]
    Dimensions {
        /// Stated width
        width: usize,
        /// Stated height
        height: usize,
        /// Actual buffer length
        len: usize,
    },
}
