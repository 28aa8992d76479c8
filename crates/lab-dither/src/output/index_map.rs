//! Per-pixel palette indices.

/// A row-major grid of palette indices, one per source pixel.
///
/// Produced once by the ditherer and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap {
    width: usize,
    height: usize,
    indices: Vec<u8>,
}

impl IndexMap {
    pub(crate) fn from_raw(width: usize, height: usize, indices: Vec<u8>) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        Self {
            width,
            height,
            indices,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Index at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width + x]
    }

    /// Rows of indices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0
        self.indices.chunks_exact(self.width.max(1))
    }

    pub fn into_indices(self) -> Vec<u8> {
        self.indices
    }
}
