//! Palettes, the Palette Matcher and the Palette Encoder
//!
//! A [`Palette`] holds up to [`MAX_PALETTE_SIZE`] CIELAB entries.
//! [`Palette::match_pixel`] selects an entry under a chroma-weighted distance
//! and [`encode_palette`] writes the fixed-size RGB table for output.

mod encode;
mod error;
#[allow(clippy::module_inception)]
mod palette;
mod presets;

pub use encode::{encode_palette, PALETTE_TABLE_LEN};
pub use error::{PaletteError, ParseColorError};
pub use palette::{Match, Palette, CHROMA_WEIGHT, LIGHTNESS_WEIGHT, MAX_PALETTE_SIZE};
pub use presets::{Preset, DEFAULT_PRESET, PRESETS};
