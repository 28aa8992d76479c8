//! Adjustment Transform
//!
//! A seven-parameter, pixel-wise tone and color transform in CIELAB. The
//! optimizer searches [`AdjustmentParams`] within [`ParamBounds`] for the
//! setting that makes an image easiest to represent in a given palette.

mod params;
mod transform;

pub use params::{AdjustmentParams, OutOfBounds, ParamBounds, PARAM_COUNT, PARAM_NAMES};
pub use transform::{adjust, adjust_pixel, CHROMA_LIMIT, VIBRANCE_CENTER, VIBRANCE_STEEPNESS};
