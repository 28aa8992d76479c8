//! Structure-Aware Ditherer
//!
//! Floyd-Steinberg error diffusion in CIELAB where each pixel's lightness is
//! nudged by a local activity signal before palette matching. Flat regions
//! get no bias; textured, bright regions get more.
//!
//! - [`Kernel`] / [`FLOYD_STEINBERG`]: where the residual goes
//! - [`ActivityWeights`] / [`ZHANG_PAN_WEIGHTS`]: how local spread is measured
//! - [`StructureAwareDither`]: the raster-scan loop

mod activity;
mod kernel;
mod structure_aware;

pub use activity::{activity_bias, ActivityWeights, BIAS_LIMIT, ZHANG_PAN_WEIGHTS};
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use structure_aware::{dither, StructureAwareDither};
