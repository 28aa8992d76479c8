//! The scalar objective minimised by the parameter search.

use crate::adjust::{adjust_pixel, AdjustmentParams};
use crate::color::LabImage;
use crate::palette::Palette;

/// Mean squared error between each source pixel and the palette color its
/// adjusted version maps to.
///
/// For every sampled pixel `p`: adjust `p`, match the result against the
/// palette (no dithering bias), and accumulate `|p - chosen|²` using the
/// unadjusted `p`. This rewards adjustments that steer pixels towards
/// palette entries close to the original color.
///
/// With `sample_stride = s > 1` only every `s`-th column of every `s`-th row
/// is evaluated.
#[derive(Debug, Clone, Copy)]
pub struct QuantizationLoss<'a> {
    image: &'a LabImage,
    palette: &'a Palette,
    stride: usize,
}

impl<'a> QuantizationLoss<'a> {
    pub fn new(image: &'a LabImage, palette: &'a Palette) -> Self {
        Self {
            image,
            palette,
            stride: 1,
        }
    }

    /// Subsample rows and columns; 0 is treated as 1.
    pub fn sample_stride(mut self, stride: usize) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Loss for `params`. An empty image has zero loss.
    pub fn evaluate(&self, params: &AdjustmentParams) -> f64 {
        let mut total = 0.0f64;
        let mut count = 0usize;
        for y in (0..self.image.height()).step_by(self.stride) {
            for x in (0..self.image.width()).step_by(self.stride) {
                let source = self.image.get(x, y);
                let adjusted = adjust_pixel(source, params);
                let index = self.palette.match_pixel(adjusted).index as usize;
                let chosen = self.palette.entries()[index];
                total += source.distance_squared(chosen) as f64;
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Lab;

    #[test]
    fn test_zero_loss_when_colors_are_in_palette() {
        let palette = Palette::preset("inky-impression-7").unwrap();
        let pixels = palette.entries().iter().copied().cycle().take(14).collect();
        let image = LabImage::new(7, 2, pixels).unwrap();
        let loss = QuantizationLoss::new(&image, &palette).evaluate(&AdjustmentParams::IDENTITY);
        assert!(loss.abs() < 1e-9, "loss {loss}");
    }

    #[test]
    fn test_measures_against_unadjusted_source() {
        // Adjustment pushes L=40 to white; loss is 60² against the source
        let palette = Palette::preset("black-white").unwrap();
        let image = LabImage::filled(2, 2, Lab::new(40.0, 0.0, 0.0));
        let params = AdjustmentParams {
            white_point: 60.0,
            ..AdjustmentParams::IDENTITY
        };
        let loss = QuantizationLoss::new(&image, &palette).evaluate(&params);
        assert!((loss - 3600.0).abs() < 1e-3, "loss {loss}");

        let identity = QuantizationLoss::new(&image, &palette).evaluate(&AdjustmentParams::IDENTITY);
        assert!((identity - 1600.0).abs() < 1e-3);
    }

    #[test]
    fn test_sample_stride() {
        // Left column black, everything else white
        let pixels = (0..16)
            .map(|i| {
                if i % 4 == 0 {
                    Lab::new(10.0, 0.0, 0.0)
                } else {
                    Lab::new(100.0, 0.0, 0.0)
                }
            })
            .collect();
        let image = LabImage::new(4, 4, pixels).unwrap();
        let palette = Palette::preset("black-white").unwrap();

        let full = QuantizationLoss::new(&image, &palette).evaluate(&AdjustmentParams::IDENTITY);
        assert!((full - 100.0 * 4.0 / 16.0).abs() < 1e-3);

        // Stride 2 samples columns 0 and 2: half the samples are dark
        let sampled = QuantizationLoss::new(&image, &palette)
            .sample_stride(2)
            .evaluate(&AdjustmentParams::IDENTITY);
        assert!((sampled - 50.0).abs() < 1e-3);

        let zero = QuantizationLoss::new(&image, &palette)
            .sample_stride(0)
            .evaluate(&AdjustmentParams::IDENTITY);
        assert_eq!(zero, full);
    }

    #[test]
    fn test_empty_image() {
        let palette = Palette::preset("black-white").unwrap();
        let image = LabImage::new(0, 3, Vec::new()).unwrap();
        assert_eq!(
            QuantizationLoss::new(&image, &palette).evaluate(&AdjustmentParams::IDENTITY),
            0.0
        );
    }
}
