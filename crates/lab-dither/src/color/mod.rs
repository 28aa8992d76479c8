//! Color types and the color space adapter
//!
//! - [`Srgb`]: device encoding used for input pixels and palette tables
//! - [`LinearRgb`]: linear light, the step between sRGB and XYZ
//! - [`Lab`]: CIELAB, the perceptually uniform space the pipeline works in
//!
//! [`to_uniform_space`] and [`from_uniform_space`] move whole rasters
//! between sRGB and a [`LabImage`].
//!
//! # Example
//!
//! ```
//! use lab_dither::{Lab, LinearRgb, Srgb};
//!
//! let srgb = Srgb::from_u8(128, 64, 32);
//! let lab = Lab::from(LinearRgb::from(srgb));
//! let back = Srgb::from(LinearRgb::from(lab));
//! assert_eq!(back.to_bytes(), [128, 64, 32]);
//! ```

mod error;
mod gamma;
mod image;
mod lab;
mod linear_rgb;
mod srgb;

pub use error::ColorError;
pub use image::{from_uniform_space, to_uniform_space, LabImage};
pub use lab::Lab;
pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
