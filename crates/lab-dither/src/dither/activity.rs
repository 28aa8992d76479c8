//! Local activity signal used to bias lightness before palette matching.
//!
//! For a pixel with a full 3x3 neighborhood:
//!
//! ```text
//! mean     = average L over the 3x3 window
//! spread   = Σ w(i,j) · |L(i,j) - mean|
//! activity = spread · (L(center) - mean)
//! bias     = clamp(strength · mean / 100 · activity, -BIAS_LIMIT, BIAS_LIMIT)
//! ```
//!
//! Pixels on the image border get zero bias.

use crate::color::LabImage;

/// Largest absolute lightness bias applied to a matching probe.
pub const BIAS_LIMIT: f32 = 20.0;

/// A symmetric 3x3 weight matrix with a zero center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityWeights {
    /// Row-major weights, `weights[dy + 1][dx + 1]`.
    pub weights: [[f32; 3]; 3],
}

const CORNER: f32 = 0.1035;
const EDGE: f32 = 0.1465;

/// Zhang-Pan structure weights: edges count more than corners.
pub const ZHANG_PAN_WEIGHTS: ActivityWeights = ActivityWeights {
    weights: [
        [CORNER, EDGE, CORNER],
        [EDGE, 0.0, EDGE],
        [CORNER, EDGE, CORNER],
    ],
};

impl Default for ActivityWeights {
    fn default() -> Self {
        ZHANG_PAN_WEIGHTS
    }
}

/// Lightness bias for the pixel at `(x, y)` of `image`.
///
/// Reads the current state of `image`, so inside the ditherer it sees error
/// already diffused into the neighborhood.
pub fn activity_bias(
    image: &LabImage,
    x: usize,
    y: usize,
    strength: f32,
    weights: &ActivityWeights,
) -> f32 {
    let (width, height) = (image.width(), image.height());
    if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
        return 0.0;
    }

    let mut window = [[0.0f32; 3]; 3];
    let mut sum = 0.0;
    for (row, wy) in window.iter_mut().zip(y - 1..=y + 1) {
        for (cell, wx) in row.iter_mut().zip(x - 1..=x + 1) {
            *cell = image.get(wx, wy).l;
            sum += *cell;
        }
    }
    let mean = sum / 9.0;

    let mut spread = 0.0;
    for (row, weight_row) in window.iter().zip(weights.weights.iter()) {
        for (&l, &w) in row.iter().zip(weight_row) {
            spread += w * (l - mean).abs();
        }
    }

    let activity = spread * (window[1][1] - mean);
    (strength * (mean / 100.0) * activity).clamp(-BIAS_LIMIT, BIAS_LIMIT)
}
