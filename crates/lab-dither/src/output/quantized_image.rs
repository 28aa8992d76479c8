//! The end product of the pipeline: indices plus the palette they refer to.

use crate::adjust::AdjustmentParams;
use crate::optimize::OptimizationReport;
use crate::palette::{encode_palette, Palette};

use super::index_map::IndexMap;

/// A dithered image together with its palette and the adjustment used.
///
/// # Example
///
/// ```
/// use lab_dither::{Quantizer, Palette, Srgb};
///
/// let pixels = vec![Srgb::from_u8(250, 250, 250); 4];
/// let image = Quantizer::new(Palette::preset("black-white").unwrap())
///     .optimize(false)
///     .quantize(&pixels, 2, 2)
///     .unwrap();
///
/// assert_eq!(image.indices(), &[1, 1, 1, 1]);
/// assert_eq!(image.palette_table().len(), 768);
/// assert_eq!(&image.to_rgb()[..3], &[255, 255, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct QuantizedImage {
    map: IndexMap,
    palette: Palette,
    params: AdjustmentParams,
    report: Option<OptimizationReport>,
}

impl QuantizedImage {
    pub fn new(map: IndexMap, palette: Palette, params: AdjustmentParams) -> Self {
        Self {
            map,
            palette,
            params,
            report: None,
        }
    }

    /// Attach the parameter search that produced `params`.
    pub fn with_report(mut self, report: OptimizationReport) -> Self {
        self.report = Some(report);
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.map.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.map.height()
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        self.map.indices()
    }

    #[inline]
    pub fn index_map(&self) -> &IndexMap {
        &self.map
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Adjustment applied before dithering.
    #[inline]
    pub fn params(&self) -> &AdjustmentParams {
        &self.params
    }

    /// Parameter search outcome, if the parameters were optimized.
    #[inline]
    pub fn report(&self) -> Option<&OptimizationReport> {
        self.report.as_ref()
    }

    /// The 768-byte RGB palette table for an indexed image file.
    pub fn palette_table(&self) -> Vec<u8> {
        encode_palette(&self.palette)
    }

    /// Expand to `[R, G, B, ...]` bytes using the palette's sRGB colors.
    pub fn to_rgb(&self) -> Vec<u8> {
        let colors: Vec<[u8; 3]> = self.palette.to_srgb().iter().map(|c| c.to_bytes()).collect();
        let mut rgb = Vec::with_capacity(self.indices().len() * 3);
        for &idx in self.indices() {
            rgb.extend_from_slice(&colors[idx as usize]);
        }
        rgb
    }
}
