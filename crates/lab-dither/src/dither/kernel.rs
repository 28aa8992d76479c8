//! Error diffusion kernel definition.

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` to a pixel that has not been visited
/// yet in raster order, and a weight numerator. A neighbor receives
/// `residual * weight / divisor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    /// (dx, dy, weight) entries; `dy` is never negative and `dx > 0` when `dy == 0`.
    pub entries: &'static [(i32, i32, u8)],
    /// Total divisor for normalizing weights.
    pub divisor: u8,
}

impl Kernel {
    /// Entries with their weight as a fraction.
    pub fn fractions(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        let divisor = self.divisor as f32;
        self.entries
            .iter()
            .map(move |&(dx, dy, w)| (dx, dy, w as f32 / divisor))
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
