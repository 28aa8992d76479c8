//! Quantizer builder: the whole pipeline behind one type.

use crate::adjust::{adjust, AdjustmentParams, ParamBounds};
use crate::color::{to_uniform_space, ColorError, LabImage, Srgb};
use crate::dither::StructureAwareDither;
use crate::optimize::{
    optimize_params, Bounds, Minimizer, NelderMead, OptimizationReport, PatternSearch,
    SearchStrategy,
};
use crate::output::QuantizedImage;
use crate::palette::Palette;

use super::error::QuantizeError;

/// Default dithering strength.
pub const DEFAULT_STRENGTH: f32 = 0.026;

/// Photo to palette-index quantizer.
///
/// Pipeline: sRGB -> CIELAB, parameter search (optional), adjustment,
/// structure-aware dithering.
///
/// # Example
///
/// ```
/// use lab_dither::{Palette, Quantizer, Srgb};
///
/// let palette = Palette::preset("inky-impression-7").unwrap();
/// let pixels: Vec<Srgb> = (0..64)
///     .map(|i| Srgb::from_u8((i * 4) as u8, 90, 200 - i as u8))
///     .collect();
///
/// let image = Quantizer::new(palette)
///     .max_iterations(40)
///     .quantize(&pixels, 8, 8)
///     .unwrap();
///
/// assert_eq!(image.indices().len(), 64);
/// assert!(image.indices().iter().all(|&i| i < 7));
/// assert!(image.report().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    palette: Palette,
    strength: f32,
    initial: AdjustmentParams,
    bounds: ParamBounds,
    optimize: bool,
    strategy: SearchStrategy,
    max_iterations: usize,
    sample_stride: usize,
    ditherer: StructureAwareDither,
}

impl Quantizer {
    /// Quantizer for `palette` with default settings: parameter search on
    /// (Nelder-Mead, 400 iterations), strength 0.026.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            strength: DEFAULT_STRENGTH,
            initial: AdjustmentParams::DEFAULT_INITIAL,
            bounds: ParamBounds::DEFAULT,
            optimize: true,
            strategy: SearchStrategy::default(),
            max_iterations: NelderMead::default().max_iterations,
            sample_stride: 1,
            ditherer: StructureAwareDither::default(),
        }
    }

    /// Dithering strength; 0 disables the activity bias.
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Starting point of the search, or the parameters used as-is when
    /// the search is off.
    pub fn initial_params(mut self, params: AdjustmentParams) -> Self {
        self.initial = params;
        self
    }

    /// Use `params` without searching. They must lie within the bounds.
    pub fn fixed_params(self, params: AdjustmentParams) -> Self {
        self.initial_params(params).optimize(false)
    }

    pub fn bounds(mut self, bounds: ParamBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Enable or disable the parameter search.
    pub fn optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Evaluate the loss on every `stride`-th row and column only.
    pub fn sample_stride(mut self, stride: usize) -> Self {
        self.sample_stride = stride.max(1);
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn minimizer(&self) -> Box<dyn Minimizer> {
        match self.strategy {
            SearchStrategy::NelderMead => {
                Box::new(NelderMead::default().max_iterations(self.max_iterations))
            }
            SearchStrategy::PatternSearch => {
                Box::new(PatternSearch::default().max_iterations(self.max_iterations))
            }
        }
    }

    /// Run the parameter search on `image` (unadjusted CIELAB).
    pub fn search(&self, image: &LabImage) -> Result<OptimizationReport, QuantizeError> {
        let report = optimize_params(
            image,
            &self.palette,
            &self.initial,
            &self.bounds,
            self.minimizer().as_ref(),
            self.sample_stride,
        )?;
        Ok(report)
    }

    /// Quantize an image already in CIELAB.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::InvalidStrength`] for a non-finite strength
    /// - [`QuantizeError::InvalidBounds`] for malformed bounds
    /// - [`QuantizeError::BoundsViolation`] when the search is off and the
    ///   fixed parameters are out of range
    pub fn quantize_lab(&self, image: &LabImage) -> Result<QuantizedImage, QuantizeError> {
        if !self.strength.is_finite() {
            return Err(QuantizeError::InvalidStrength(self.strength));
        }

        let (params, report) = if self.optimize {
            let report = self.search(image)?;
            (report.params, Some(report))
        } else {
            Bounds::new(self.bounds.ranges.to_vec())?;
            self.bounds.check(&self.initial)?;
            (self.initial, None)
        };

        let adjusted = adjust(image, &params);
        let map = self.ditherer.dither(&adjusted, &self.palette, self.strength);

        tracing::debug!(
            width = map.width(),
            height = map.height(),
            palette = self.palette.len(),
            optimized = report.is_some(),
            "quantized image"
        );

        let image = QuantizedImage::new(map, self.palette.clone(), params);
        Ok(match report {
            Some(report) => image.with_report(report),
            None => image,
        })
    }

    /// Quantize an sRGB raster (channels in 0.0..=1.0).
    ///
    /// # Errors
    ///
    /// [`QuantizeError::Dimensions`] and [`QuantizeError::Color`] for bad
    /// input, plus everything [`quantize_lab`](Self::quantize_lab) returns.
    pub fn quantize(
        &self,
        pixels: &[Srgb],
        width: usize,
        height: usize,
    ) -> Result<QuantizedImage, QuantizeError> {
        let lab = to_uniform_space(pixels, width, height).map_err(|err| match err {
            ColorError::Dimensions { width, height, len } => {
                QuantizeError::Dimensions { width, height, len }
            }
            other => QuantizeError::Color(other),
        })?;
        self.quantize_lab(&lab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Lab;
    use crate::optimize::Convergence;

    fn bw() -> Palette {
        Palette::preset("black-white").unwrap()
    }

    #[test]
    fn test_fixed_params_out_of_bounds_rejected() {
        let params = AdjustmentParams {
            contrast: 0.1,
            ..AdjustmentParams::IDENTITY
        };
        let err = Quantizer::new(bw())
            .fixed_params(params)
            .quantize(&[Srgb::from_u8(0, 0, 0)], 1, 1)
            .unwrap_err();
        assert_eq!(
            err,
            QuantizeError::BoundsViolation {
                name: "contrast",
                value: 0.1,
                min: 0.8,
                max: 3.0
            }
        );
    }

    #[test]
    fn test_fixed_params_used_as_is() {
        let image = Quantizer::new(bw())
            .fixed_params(AdjustmentParams::IDENTITY)
            .quantize_lab(&LabImage::filled(3, 3, Lab::new(80.0, 0.0, 0.0)))
            .unwrap();
        assert_eq!(image.params(), &AdjustmentParams::IDENTITY);
        assert!(image.report().is_none());
    }

    #[test]
    fn test_input_errors() {
        let q = Quantizer::new(bw());
        assert_eq!(
            q.quantize(&[Srgb::new(0.0, 0.0, 0.0); 3], 2, 2).unwrap_err(),
            QuantizeError::Dimensions {
                width: 2,
                height: 2,
                len: 3
            }
        );
        assert!(matches!(
            q.quantize(&[Srgb::new(f32::INFINITY, 0.0, 0.0)], 1, 1),
            Err(QuantizeError::Color(ColorError::InputDomain { .. }))
        ));
        assert_eq!(
            q.clone()
                .strength(f32::NAN)
                .quantize(&[Srgb::new(0.0, 0.0, 0.0)], 1, 1)
                .unwrap_err()
                .to_string(),
            "dithering strength must be finite, got NaN"
        );
    }

    #[test]
    fn test_invalid_bounds() {
        let mut bounds = ParamBounds::DEFAULT;
        bounds.ranges[2] = (10.0, -10.0);
        let err = Quantizer::new(bw())
            .bounds(bounds)
            .quantize_lab(&LabImage::filled(1, 1, Lab::default()))
            .unwrap_err();
        assert!(matches!(err, QuantizeError::InvalidBounds(_)));
    }

    #[test]
    fn test_optimized_run_reports() {
        let pixels: Vec<Lab> = (0..100)
            .map(|i| Lab::new(i as f32, (i % 10) as f32 * 4.0 - 20.0, 0.0))
            .collect();
        let image = LabImage::new(10, 10, pixels).unwrap();
        let palette = Palette::preset("inky-impression-7").unwrap();

        for strategy in [SearchStrategy::NelderMead, SearchStrategy::PatternSearch] {
            let result = Quantizer::new(palette.clone())
                .strategy(strategy)
                .max_iterations(30)
                .quantize_lab(&image)
                .unwrap();
            let report = result.report().unwrap();
            assert!(report.loss <= report.initial_loss);
            assert!(ParamBounds::DEFAULT.check(result.params()).is_ok());
            assert!(matches!(
                report.status,
                Convergence::Converged | Convergence::BudgetExhausted
            ));
        }
    }

    #[test]
    fn test_palette_too_large_surfaces_before_dithering() {
        let err = Palette::new(&vec![Lab::default(); 300]).unwrap_err();
        let err: QuantizeError = err.into();
        assert!(matches!(
            err,
            QuantizeError::Palette(crate::palette::PaletteError::TooLarge { len: 300, .. })
        ));
    }
}
