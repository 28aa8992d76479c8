//! Parameter Optimizer
//!
//! Derivative-free, bound-constrained search for the [`AdjustmentParams`]
//! that minimise [`QuantizationLoss`]. The search algorithm is a
//! [`Minimizer`]; [`NelderMead`] is the default and [`PatternSearch`] is a
//! slower but very robust alternative.
//!
//! The loss is piecewise constant (nearest-palette assignment jumps), so the
//! result is a best-effort local minimum from the starting point.

mod loss;
mod nelder_mead;
mod pattern_search;

use thiserror::Error;

use crate::adjust::{AdjustmentParams, ParamBounds, PARAM_COUNT};
use crate::color::LabImage;
use crate::palette::Palette;

pub use loss::QuantizationLoss;
pub use nelder_mead::NelderMead;
pub use pattern_search::PatternSearch;

/// Whether the search met its tolerance before running out of budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// Simplex (or step) size and loss spread fell under tolerance.
    Converged,
    /// Iteration or evaluation budget ran out first. The best point found
    /// is still returned.
    BudgetExhausted,
}

/// A `[min, max]` box constraint per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    ranges: Vec<(f64, f64)>,
}

/// A box constraint with `min > max` or a non-finite limit.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid bounds for dimension {index}: [{min}, {max}]")]
pub struct InvalidBounds {
    pub index: usize,
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(ranges: Vec<(f64, f64)>) -> Result<Self, InvalidBounds> {
        for (index, &(min, max)) in ranges.iter().enumerate() {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(InvalidBounds { index, min, max });
            }
        }
        Ok(Self { ranges })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn ranges(&self) -> &[(f64, f64)] {
        &self.ranges
    }

    /// Clamp every coordinate of `point` into its range.
    pub fn clip(&self, point: &mut [f64]) {
        for (v, &(lo, hi)) in point.iter_mut().zip(&self.ranges) {
            *v = v.clamp(lo, hi);
        }
    }
}

/// Result of a [`Minimizer`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Best point found; always inside the bounds.
    pub point: Vec<f64>,
    /// Loss at `point`.
    pub value: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub status: Convergence,
}

/// A derivative-free, bound-constrained minimisation strategy.
///
/// Implementations must only evaluate `loss` at points inside `bounds` and
/// must return the best point they evaluated.
///
/// # Panics
///
/// When `initial.len()` differs from `bounds.dim()`.
pub trait Minimizer {
    fn minimize(
        &self,
        loss: &mut dyn FnMut(&[f64]) -> f64,
        initial: &[f64],
        bounds: &Bounds,
    ) -> Minimum;
}

/// Loss wrapper that counts calls and maps NaN to +inf.
pub(crate) struct Objective<'a> {
    loss: &'a mut dyn FnMut(&[f64]) -> f64,
    pub(crate) evaluations: usize,
}

impl<'a> Objective<'a> {
    pub(crate) fn new(loss: &'a mut dyn FnMut(&[f64]) -> f64) -> Self {
        Self {
            loss,
            evaluations: 0,
        }
    }

    pub(crate) fn eval(&mut self, point: &[f64]) -> f64 {
        self.evaluations += 1;
        let value = (self.loss)(point);
        if value.is_nan() {
            f64::INFINITY
        } else {
            value
        }
    }
}

/// Which [`Minimizer`] to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    #[default]
    NelderMead,
    PatternSearch,
}

impl SearchStrategy {
    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::NelderMead => "nelder-mead",
            SearchStrategy::PatternSearch => "pattern-search",
        }
    }
}

impl std::str::FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nelder-mead" => Ok(SearchStrategy::NelderMead),
            "pattern-search" => Ok(SearchStrategy::PatternSearch),
            other => Err(format!(
                "unknown search strategy '{other}' (expected nelder-mead or pattern-search)"
            )),
        }
    }
}

/// Outcome of [`optimize_params`].
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    pub params: AdjustmentParams,
    /// Loss at `params`.
    pub loss: f64,
    /// Loss at the initial parameters (after clipping).
    pub initial_loss: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub status: Convergence,
}

/// Search `bounds` for the parameters minimising the quantization loss of
/// `image` against `palette`, starting at `initial`.
///
/// `image` is the unadjusted source. `initial` is clipped into `bounds`.
/// Never returns parameters worse than the clipped starting point.
///
/// # Errors
///
/// [`InvalidBounds`] when a range has `min > max` or a non-finite limit.
pub fn optimize_params(
    image: &LabImage,
    palette: &Palette,
    initial: &AdjustmentParams,
    bounds: &ParamBounds,
    minimizer: &dyn Minimizer,
    sample_stride: usize,
) -> Result<OptimizationReport, InvalidBounds> {
    let search_bounds = Bounds::new(bounds.ranges.to_vec())?;
    let objective = QuantizationLoss::new(image, palette).sample_stride(sample_stride);
    let start = initial.clamped(bounds);
    let initial_loss = objective.evaluate(&start);

    let mut loss = |x: &[f64]| -> f64 {
        let mut values = [0.0; PARAM_COUNT];
        values.copy_from_slice(x);
        objective.evaluate(&AdjustmentParams::from_array(values))
    };

    let minimum = minimizer.minimize(&mut loss, &start.to_array(), &search_bounds);

    let (params, best) = if minimum.value <= initial_loss {
        let mut values = [0.0; PARAM_COUNT];
        values.copy_from_slice(&minimum.point);
        (AdjustmentParams::from_array(values), minimum.value)
    } else {
        (start, initial_loss)
    };

    tracing::debug!(
        initial_loss,
        loss = best,
        iterations = minimum.iterations,
        evaluations = minimum.evaluations,
        status = ?minimum.status,
        "parameter search finished"
    );

    Ok(OptimizationReport {
        params,
        loss: best,
        initial_loss,
        iterations: minimum.iterations,
        evaluations: minimum.evaluations,
        status: minimum.status,
    })
}
