//! Adjustment parameters and their valid ranges.

use thiserror::Error;

/// Number of adjustment parameters.
pub const PARAM_COUNT: usize = 7;

/// Parameter names in vector order.
pub const PARAM_NAMES: [&str; PARAM_COUNT] = [
    "saturation",
    "vibrance",
    "black_point",
    "white_point",
    "gamma",
    "contrast",
    "hue_rotation",
];

/// The seven knobs of the [`adjust`](crate::adjust) transform.
///
/// The optimizer works on these as a flat `[f64; 7]` vector in
/// [`PARAM_NAMES`] order; see [`to_array`](Self::to_array).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentParams {
    /// Chroma multiplier.
    pub saturation: f64,
    /// Extra chroma boost for weakly saturated pixels.
    pub vibrance: f64,
    /// Lightness mapped to 0.
    pub black_point: f64,
    /// Lightness mapped to 100.
    pub white_point: f64,
    /// Lightness gamma; values above 1 brighten midtones.
    pub gamma: f64,
    /// S-curve strength; 1 is neutral.
    pub contrast: f64,
    /// Rotation of the a/b plane in radians.
    pub hue_rotation: f64,
}

impl AdjustmentParams {
    /// Parameters for which [`adjust`](crate::adjust) leaves in-range pixels unchanged.
    pub const IDENTITY: Self = Self {
        saturation: 1.0,
        vibrance: 0.0,
        black_point: 0.0,
        white_point: 100.0,
        gamma: 1.0,
        contrast: 1.0,
        hue_rotation: 0.0,
    };

    /// Starting point for the optimizer: a mild saturation and vibrance lift.
    pub const DEFAULT_INITIAL: Self = Self {
        saturation: 1.1,
        vibrance: 0.5,
        black_point: 0.0,
        white_point: 100.0,
        gamma: 1.0,
        contrast: 1.0,
        hue_rotation: 0.0,
    };

    /// Flatten in [`PARAM_NAMES`] order.
    pub fn to_array(&self) -> [f64; PARAM_COUNT] {
        [
            self.saturation,
            self.vibrance,
            self.black_point,
            self.white_point,
            self.gamma,
            self.contrast,
            self.hue_rotation,
        ]
    }

    /// Inverse of [`to_array`](Self::to_array).
    pub fn from_array(values: [f64; PARAM_COUNT]) -> Self {
        let [saturation, vibrance, black_point, white_point, gamma, contrast, hue_rotation] =
            values;
        Self {
            saturation,
            vibrance,
            black_point,
            white_point,
            gamma,
            contrast,
            hue_rotation,
        }
    }

    /// Copy with every field clamped into `bounds`.
    ///
    /// # Example
    ///
    /// ```
    /// use lab_dither::{AdjustmentParams, ParamBounds};
    ///
    /// let wild = AdjustmentParams { gamma: 9.0, ..AdjustmentParams::IDENTITY };
    /// assert_eq!(wild.clamped(&ParamBounds::DEFAULT).gamma, 2.2);
    /// ```
    pub fn clamped(&self, bounds: &ParamBounds) -> Self {
        let mut values = self.to_array();
        for (v, &(lo, hi)) in values.iter_mut().zip(bounds.ranges.iter()) {
            *v = v.clamp(lo, hi);
        }
        Self::from_array(values)
    }
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self::DEFAULT_INITIAL
    }
}

/// A parameter outside its declared range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{name} = {value} is outside [{min}, {max}]")]
pub struct OutOfBounds {
    pub name: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Inclusive `(min, max)` range per parameter, in [`PARAM_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    pub ranges: [(f64, f64); PARAM_COUNT],
}

impl ParamBounds {
    /// Ranges used by the optimizer and for validating manual parameters.
    pub const DEFAULT: Self = Self {
        ranges: [
            (0.5, 3.0),
            (0.0, 2.0),
            (-20.0, 40.0),
            (60.0, 150.0),
            (0.4, 2.2),
            (0.8, 3.0),
            (-0.2, 0.2),
        ],
    };

    /// Check every field, reporting the first one out of range.
    ///
    /// NaN is always out of range.
    pub fn check(&self, params: &AdjustmentParams) -> Result<(), OutOfBounds> {
        for ((&name, value), &(min, max)) in PARAM_NAMES
            .iter()
            .zip(params.to_array())
            .zip(self.ranges.iter())
        {
            if !(min..=max).contains(&value) {
                return Err(OutOfBounds {
                    name,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn lower(&self) -> [f64; PARAM_COUNT] {
        self.ranges.map(|(lo, _)| lo)
    }

    #[inline]
    pub fn upper(&self) -> [f64; PARAM_COUNT] {
        self.ranges.map(|(_, hi)| hi)
    }
}

impl Default for ParamBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}
