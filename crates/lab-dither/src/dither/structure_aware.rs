//! Structure-aware Floyd-Steinberg error diffusion in CIELAB.

use crate::color::{Lab, LabImage};
use crate::output::IndexMap;
use crate::palette::Palette;

use super::activity::{activity_bias, ActivityWeights, ZHANG_PAN_WEIGHTS};
use super::kernel::{Kernel, FLOYD_STEINBERG};

/// Error diffusion with an activity-driven lightness bias.
///
/// Pixels are visited in plain raster order (no serpentine). For each pixel
/// the ditherer:
///
/// 1. computes [`activity_bias`] from the working buffer,
/// 2. matches `pixel + bias` (lightness only) against the palette,
/// 3. diffuses `pixel - chosen` to unvisited neighbors with the kernel.
///
/// The bias only steers selection; the propagated residual is taken from
/// the unbiased pixel.
///
/// # Example
///
/// ```
/// use lab_dither::{Lab, LabImage, Palette, StructureAwareDither};
///
/// let palette = Palette::preset("black-white").unwrap();
/// let image = LabImage::filled(8, 8, Lab::new(25.0, 0.0, 0.0));
/// let map = StructureAwareDither::default().dither(&image, &palette, 0.026);
///
/// let white = map.indices().iter().filter(|&&i| i == 1).count();
/// assert!((12..=20).contains(&white));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureAwareDither {
    pub kernel: Kernel,
    pub weights: ActivityWeights,
}

impl Default for StructureAwareDither {
    fn default() -> Self {
        Self {
            kernel: FLOYD_STEINBERG,
            weights: ZHANG_PAN_WEIGHTS,
        }
    }
}

impl StructureAwareDither {
    /// Dither `image` to `palette` indices.
    ///
    /// `image` is not modified; diffusion runs on a private working copy.
    /// Deterministic for identical inputs.
    pub fn dither(&self, image: &LabImage, palette: &Palette, strength: f32) -> IndexMap {
        let (width, height) = (image.width(), image.height());
        let mut work = image.clone();
        let mut indices = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let pixel = work.get(x, y);
                let bias = activity_bias(&work, x, y, strength, &self.weights);
                let probe = Lab::new(pixel.l + bias, pixel.a, pixel.b);

                let index = palette.match_pixel(probe).index;
                indices.push(index);

                let chosen = palette.entries()[index as usize];
                self.diffuse(&mut work, x, y, pixel - chosen);
            }
        }

        IndexMap::from_raw(width, height, indices)
    }

    fn diffuse(&self, work: &mut LabImage, x: usize, y: usize, residual: Lab) {
        let (width, height) = (work.width() as i64, work.height() as i64);
        for (dx, dy, fraction) in self.kernel.fractions() {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                continue;
            }
            let idx = ny as usize * width as usize + nx as usize;
            work.pixels_mut()[idx] += residual * fraction;
        }
    }
}

/// Dither with the default kernel and weights.
pub fn dither(image: &LabImage, palette: &Palette, strength: f32) -> IndexMap {
    StructureAwareDither::default().dither(image, palette, strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_white() -> Palette {
        Palette::preset("black-white").unwrap()
    }

    fn gradient(width: usize, height: usize) -> LabImage {
        let pixels = (0..width * height)
            .map(|i| {
                let x = (i % width) as f32;
                let y = (i / width) as f32;
                Lab::new(
                    100.0 * x / (width - 1) as f32,
                    (y * 13.0) % 60.0 - 30.0,
                    (x * 7.0) % 80.0 - 40.0,
                )
            })
            .collect();
        LabImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_flat_gray_scenario() {
        let image = LabImage::filled(4, 4, Lab::new(50.0, 0.0, 0.0));
        let map = dither(&image, &black_white(), 0.0);

        assert_eq!(map.get(0, 0), 0, "Exact tie at L=50 resolves to index 0");
        #[rustfmt::skip]
        let expected = [
            0, 1, 0, 1,
            1, 0, 1, 0,
            0, 1, 0, 1,
            1, 0, 1, 0,
        ];
        assert_eq!(map.indices(), &expected);
    }

    #[test]
    fn test_exact_palette_color_has_no_drift() {
        let palette = Palette::preset("inky-impression-7").unwrap();
        let red = palette.entry(4).unwrap();
        let image = LabImage::filled(6, 5, red);
        let map = dither(&image, &palette, 0.026);
        assert!(map.indices().iter().all(|&i| i == 4));
    }

    #[test]
    fn test_deterministic() {
        let image = gradient(24, 17);
        let palette = Palette::preset("inky-impression-7").unwrap();
        let first = dither(&image, &palette, 0.026);
        let second = dither(&image, &palette, 0.026);
        assert_eq!(first, second);
    }

    #[test]
    fn test_indices_always_valid() {
        let image = gradient(31, 9);
        for name in ["black-white", "inky-impression-7"] {
            let palette = Palette::preset(name).unwrap();
            for strength in [0.0, 0.026, 5.0, -5.0] {
                let map = dither(&image, &palette, strength);
                assert_eq!(map.indices().len(), 31 * 9);
                assert!(map.indices().iter().all(|&i| (i as usize) < palette.len()));
            }
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let image = gradient(8, 8);
        let copy = image.clone();
        let _ = dither(&image, &black_white(), 0.026);
        assert_eq!(image, copy);
    }

    #[test]
    fn test_preserves_average_tone() {
        let image = LabImage::filled(20, 20, Lab::new(30.0, 0.0, 0.0));
        let map = dither(&image, &black_white(), 0.026);
        let white = map.indices().iter().filter(|&&i| i == 1).count() as f32;
        let ratio = white / 400.0;
        assert!((ratio - 0.3).abs() < 0.05, "white ratio {ratio}");
    }

    #[test]
    fn test_bias_only_affects_selection() {
        // A strong bias can flip choices, but the map must still be a valid
        // dithering of the same image and differ only through selection.
        let image = gradient(12, 12);
        let palette = black_white();
        let plain = dither(&image, &palette, 0.0);
        let biased = dither(&image, &palette, 1.0);
        assert_eq!(plain.width(), biased.width());
        assert_eq!(plain.get(0, 0), biased.get(0, 0), "Border pixel has no bias");
    }

    #[test]
    fn test_degenerate_sizes() {
        let palette = black_white();
        for (w, h) in [(1, 1), (1, 5), (5, 1), (2, 2)] {
            let image = LabImage::filled(w, h, Lab::new(70.0, 0.0, 0.0));
            let map = dither(&image, &palette, 0.026);
            assert_eq!((map.width(), map.height()), (w, h));
        }
        let empty = LabImage::new(0, 0, Vec::new()).unwrap();
        assert!(dither(&empty, &palette, 0.026).indices().is_empty());
    }
}
