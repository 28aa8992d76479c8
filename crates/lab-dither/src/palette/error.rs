//! Error types for palette operations

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
///
/// All of these are raised when the palette is built, so a bad palette is
/// surfaced before any dithering starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// More entries than the output palette table can hold
    #[error("palette has {len} entries, the output format holds at most {max}")]
    TooLarge {
        /// Number of entries supplied
        len: usize,
        /// Maximum slot count
        max: usize,
    },
    /// An entry contains NaN or infinity
    #[error("palette entry {index} is not finite")]
    NonFiniteEntry {
        /// Index of the bad entry
        index: usize,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
    /// No built-in palette with this name
    #[error("unknown palette preset '{0}'")]
    UnknownPreset(String),
}
