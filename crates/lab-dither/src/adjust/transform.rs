//! The pixel-wise adjustment pipeline.
//!
//! Steps, in order: black/white point remap, contrast S-curve, gamma, hue
//! rotation, vibrance, saturation, final clamp. Lightness work happens in
//! `f64`; results are stored back as `f32`.

use crate::color::{Lab, LabImage};

use super::params::AdjustmentParams;

/// Chroma magnitude at which the vibrance boost is halved.
pub const VIBRANCE_CENTER: f64 = 50.0;

/// Steepness of the vibrance logistic falloff.
pub const VIBRANCE_STEEPNESS: f64 = 0.1;

/// Output limit for each chroma channel.
pub const CHROMA_LIMIT: f64 = 127.0;

/// Smallest denominator allowed in the black/white remap.
const MIN_TONAL_RANGE: f64 = 1.0;

/// Contrast below which the S-curve is replaced by its limit.
const MIN_CONTRAST: f64 = 1e-6;

/// Apply the adjustment to every pixel of `image`.
///
/// Pure and deterministic. Parameters are used as given; validating them
/// against [`ParamBounds`](crate::ParamBounds) is the caller's job.
///
/// # Example
///
/// ```
/// use lab_dither::{adjust, AdjustmentParams, Lab, LabImage};
///
/// let image = LabImage::filled(2, 2, Lab::new(40.0, 10.0, -5.0));
/// let same = adjust(&image, &AdjustmentParams::IDENTITY);
/// assert!((same.get(1, 1).l - 40.0).abs() < 1e-4);
/// ```
pub fn adjust(image: &LabImage, params: &AdjustmentParams) -> LabImage {
    image.map(|p| adjust_pixel(p, params))
}

/// Adjust a single pixel.
///
/// Output lightness is always within 0..=100 and both chroma channels
/// within ±[`CHROMA_LIMIT`] for finite input.
pub fn adjust_pixel(pixel: Lab, params: &AdjustmentParams) -> Lab {
    let range = (params.white_point - params.black_point).max(MIN_TONAL_RANGE);
    let l = (pixel.l as f64 - params.black_point) * 100.0 / range;

    let l = 50.0 + 50.0 * contrast_curve((l - 50.0) / 50.0, params.contrast);

    let l = (l / 100.0).clamp(0.0, 1.0).powf(1.0 / params.gamma) * 100.0;

    let (sin, cos) = params.hue_rotation.sin_cos();
    let (a, b) = (pixel.a as f64, pixel.b as f64);
    let (a, b) = (a * cos - b * sin, a * sin + b * cos);

    let chroma = a.hypot(b);
    let vibrance = 1.0
        + params.vibrance / (1.0 + (VIBRANCE_STEEPNESS * (chroma - VIBRANCE_CENTER)).exp());
    let scale = params.saturation * vibrance;

    Lab::new(
        l.clamp(0.0, 100.0) as f32,
        (a * scale).clamp(-CHROMA_LIMIT, CHROMA_LIMIT) as f32,
        (b * scale).clamp(-CHROMA_LIMIT, CHROMA_LIMIT) as f32,
    )
}

/// Bounded S-curve on `n` in -1..=1.
///
/// `tanh(c·atanh(n·tanh 1)) / tanh(c)`: fixes -1, 0 and 1, is the identity
/// at `c = 1`, steepens the midtones for `c > 1` and flattens them below.
/// Inputs outside -1..=1 are clamped first. As `c` approaches 0 the curve
/// tends to `atanh(n·tanh 1)`, which is used directly below [`MIN_CONTRAST`].
fn contrast_curve(n: f64, contrast: f64) -> f64 {
    let n = n.clamp(-1.0, 1.0);
    let u = (n * 1.0_f64.tanh()).atanh();
    if contrast.abs() < MIN_CONTRAST {
        return u;
    }
    (contrast * u).tanh() / contrast.tanh()
}
