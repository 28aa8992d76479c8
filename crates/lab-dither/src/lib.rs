//! lab-dither: palette quantization for low-color displays
//!
//! Converts photographs to a small fixed palette (at most 256 entries)
//! while keeping perceived tone and detail. Everything happens in CIELAB:
//!
//! 1. [`to_uniform_space`] converts sRGB pixels to a [`LabImage`].
//! 2. [`optimize_params`] searches the seven [`AdjustmentParams`] for the
//!    setting that lets the palette represent the image best.
//! 3. [`adjust`] applies that setting.
//! 4. [`StructureAwareDither`] error-diffuses the result to palette indices,
//!    nudging lightness by local activity before each match.
//! 5. [`encode_palette`] writes the 768-byte RGB table for indexed output.
//!
//! # Quick Start
//!
//! ```
//! use lab_dither::{Palette, Quantizer, Srgb};
//!
//! let palette = Palette::preset("inky-impression-7").unwrap();
//! let pixels = vec![Srgb::from_u8(200, 40, 40); 16];
//!
//! let image = Quantizer::new(palette).quantize(&pixels, 4, 4).unwrap();
//! assert_eq!(image.width(), 4);
//! assert_eq!(image.palette_table().len(), 768);
//! ```
//!
//! # Matching and diffusion
//!
//! Palette selection uses `dL² + 1.5·(da² + db²)`; the error passed on to
//! neighbors is the plain difference to the chosen entry. Diffusion uses the
//! Floyd-Steinberg kernel in raster order.

#![allow(clippy::excessive_precision)]

pub mod adjust;
pub mod api;
pub mod color;
pub mod dither;
pub mod optimize;
pub mod output;
pub mod palette;


pub use adjust::{adjust, adjust_pixel, AdjustmentParams, OutOfBounds, ParamBounds};
pub use api::{QuantizeError, Quantizer, DEFAULT_STRENGTH};
pub use color::{from_uniform_space, to_uniform_space, ColorError, Lab, LabImage, LinearRgb, Srgb};
pub use dither::{activity_bias, ActivityWeights, Kernel, StructureAwareDither, FLOYD_STEINBERG};
pub use optimize::{
    optimize_params, Bounds, Convergence, InvalidBounds, Minimizer, Minimum, NelderMead,
    OptimizationReport, PatternSearch, QuantizationLoss, SearchStrategy,
};
pub use output::{IndexMap, QuantizedImage};
pub use palette::{encode_palette, Match, Palette, PaletteError, ParseColorError, PRESETS};
