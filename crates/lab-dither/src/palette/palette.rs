//! Palette storage and the perceptually weighted nearest-color matcher.

use crate::color::{Lab, LinearRgb, Srgb};

use super::error::PaletteError;

/// Maximum number of palette entries; the size of an 8-bit palette table.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Weight of the squared lightness difference in the matching distance.
pub const LIGHTNESS_WEIGHT: f32 = 1.0;

/// Weight of each squared chroma difference in the matching distance.
///
/// Chroma errors are penalised more than lightness errors, which reads
/// better on reflective displays with muted inks.
pub const CHROMA_WEIGHT: f32 = 1.5;

/// Result of matching one pixel against a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Index of the chosen palette entry.
    pub index: u8,
    /// `pixel - palette[index]`, unweighted. This is what error diffusion
    /// propagates.
    pub residual: Lab,
}

/// An ordered, immutable set of at most 256 CIELAB colors.
///
/// Indices are stable: entry `i` is always written to slot `i` of the output
/// palette table. Duplicate entries are allowed; the matcher resolves ties to
/// the lowest index.
///
/// # Example
///
/// ```
/// use lab_dither::{Lab, Palette};
///
/// let palette = Palette::new(&[Lab::new(0.0, 0.0, 0.0), Lab::new(100.0, 0.0, 0.0)]).unwrap();
/// let m = palette.match_pixel(Lab::new(70.0, 0.0, 0.0));
/// assert_eq!(m.index, 1);
/// assert_eq!(m.residual, Lab::new(-30.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<Lab>,
}

impl Palette {
    /// Build a palette from CIELAB entries.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `entries` is empty
    /// - [`PaletteError::TooLarge`] for more than [`MAX_PALETTE_SIZE`] entries
    /// - [`PaletteError::NonFiniteEntry`] if any channel is NaN or infinite
    pub fn new(entries: &[Lab]) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if entries.len() > MAX_PALETTE_SIZE {
            return Err(PaletteError::TooLarge {
                len: entries.len(),
                max: MAX_PALETTE_SIZE,
            });
        }
        if let Some(index) = entries.iter().position(|e| !e.is_finite()) {
            return Err(PaletteError::NonFiniteEntry { index });
        }
        Ok(Self {
            entries: entries.to_vec(),
        })
    }

    /// Build a palette from sRGB colors.
    pub fn from_srgb(colors: &[Srgb]) -> Result<Self, PaletteError> {
        let entries: Vec<Lab> = colors
            .iter()
            .map(|&c| Lab::from(LinearRgb::from(c)))
            .collect();
        Self::new(&entries)
    }

    /// Build a palette from hex strings such as `"#ff0000"` or `"0F0"`.
    ///
    /// # Example
    ///
    /// ```
    /// use lab_dither::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let srgb = colors
            .iter()
            .map(|s| s.parse::<Srgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_srgb(&srgb)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a palette has at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if present.
    #[inline]
    pub fn entry(&self, index: usize) -> Option<Lab> {
        self.entries.get(index).copied()
    }

    #[inline]
    pub fn entries(&self) -> &[Lab] {
        &self.entries
    }

    /// Entries converted back to sRGB (gamut-clamped).
    pub fn to_srgb(&self) -> Vec<Srgb> {
        self.entries
            .iter()
            .map(|&e| Srgb::from(LinearRgb::from(e)))
            .collect()
    }

    /// Find the closest entry to `pixel`.
    ///
    /// Distance is `LIGHTNESS_WEIGHT·dL² + CHROMA_WEIGHT·(da² + db²)`. The
    /// first entry reaching the minimum wins. The returned residual is the
    /// plain difference `pixel - entry`.
    pub fn match_pixel(&self, pixel: Lab) -> Match {
        let mut best = 0;
        let mut best_distance = f32::INFINITY;
        for (i, &entry) in self.entries.iter().enumerate() {
            let distance = weighted_distance(pixel, entry);
            if distance < best_distance {
                best_distance = distance;
                best = i;
            }
        }

        Match {
            index: best as u8,
            residual: pixel - self.entries[best],
        }
    }
}

#[inline]
fn weighted_distance(pixel: Lab, entry: Lab) -> f32 {
    let d = pixel - entry;
    LIGHTNESS_WEIGHT * d.l * d.l + CHROMA_WEIGHT * (d.a * d.a + d.b * d.b)
}
