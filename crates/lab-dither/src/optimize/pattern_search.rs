//! Compass (coordinate pattern) search.

use super::{Bounds, Convergence, Minimizer, Minimum, Objective};

/// Polls `x ± step·e_k` along each axis and moves to the first improvement.
/// When no poll improves, every step is halved.
///
/// Steps start at a fraction of each dimension's range, so this explores
/// far more aggressively than [`NelderMead`](super::NelderMead) and can
/// cross the plateaus a piecewise-constant loss produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternSearch {
    pub max_iterations: usize,
    pub evaluations_per_dim: usize,
    /// Initial step as a fraction of each dimension's range.
    pub initial_step: f64,
    /// Stop once every step is below this fraction of its range.
    pub step_tolerance: f64,
}

impl Default for PatternSearch {
    fn default() -> Self {
        Self {
            max_iterations: 400,
            evaluations_per_dim: 200,
            initial_step: 0.25,
            step_tolerance: 1e-4,
        }
    }
}

impl PatternSearch {
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Minimizer for PatternSearch {
    fn minimize(
        &self,
        loss: &mut dyn FnMut(&[f64]) -> f64,
        initial: &[f64],
        bounds: &Bounds,
    ) -> Minimum {
        assert_eq!(
            initial.len(),
            bounds.dim(),
            "initial point and bounds differ in dimension"
        );
        let max_evaluations = self.evaluations_per_dim * initial.len().max(1);
        let mut objective = Objective::new(loss);

        let mut x = initial.to_vec();
        bounds.clip(&mut x);
        let mut fx = objective.eval(&x);

        let widths: Vec<f64> = bounds.ranges().iter().map(|&(lo, hi)| hi - lo).collect();
        let mut steps: Vec<f64> = widths.iter().map(|w| w * self.initial_step).collect();

        let mut iterations = 0;
        let mut status = Convergence::BudgetExhausted;

        'search: while iterations < self.max_iterations {
            if steps
                .iter()
                .zip(&widths)
                .all(|(s, w)| *s <= self.step_tolerance * w)
            {
                status = Convergence::Converged;
                break;
            }
            iterations += 1;

            let mut improved = false;
            'poll: for k in 0..x.len() {
                for direction in [1.0, -1.0] {
                    if objective.evaluations >= max_evaluations {
                        break 'search;
                    }
                    let mut trial = x.clone();
                    trial[k] += direction * steps[k];
                    bounds.clip(&mut trial);
                    if trial[k] == x[k] {
                        continue;
                    }
                    let f_trial = objective.eval(&trial);
                    if f_trial < fx {
                        x = trial;
                        fx = f_trial;
                        improved = true;
                        break 'poll;
                    }
                }
            }

            if !improved {
                for s in &mut steps {
                    *s *= 0.5;
                }
            }
        }

        Minimum {
            point: x,
            value: fx,
            iterations,
            evaluations: objective.evaluations,
            status,
        }
    }
}
