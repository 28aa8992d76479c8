//! Bounded Nelder-Mead simplex search.
//!
//! Standard coefficients (reflection 1, expansion 2, contraction 0.5,
//! shrink 0.5). Every trial point is clipped into the bounds before it is
//! evaluated, so the loss never sees an out-of-range vector.

use super::{Bounds, Convergence, Minimizer, Minimum, Objective};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Relative size of the initial simplex along each axis.
const NONZERO_STEP: f64 = 0.05;
/// Absolute initial step for coordinates that start at zero.
const ZERO_STEP: f64 = 0.000_25;

/// Nelder-Mead with box constraints.
///
/// Stops when both the simplex extent and the spread of loss values across
/// its vertices are within tolerance, or when a budget runs out.
///
/// # Example
///
/// ```
/// use lab_dither::{Bounds, Minimizer, NelderMead};
///
/// let bounds = Bounds::new(vec![(-5.0, 5.0), (-5.0, 5.0)]).unwrap();
/// let mut loss = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2);
/// let min = NelderMead::default().minimize(&mut loss, &[0.0, 0.0], &bounds);
/// assert!((min.point[0] - 1.0).abs() < 1e-2);
/// assert!((min.point[1] + 2.0).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMead {
    pub max_iterations: usize,
    /// Evaluation budget per dimension.
    pub evaluations_per_dim: usize,
    /// Absolute tolerance on vertex coordinates.
    pub xatol: f64,
    /// Absolute tolerance on loss values.
    pub fatol: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: 400,
            evaluations_per_dim: 200,
            xatol: 1e-4,
            fatol: 1e-4,
        }
    }
}

impl NelderMead {
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Total evaluation budget for an `n`-dimensional problem.
    pub fn max_evaluations(&self, n: usize) -> usize {
        self.evaluations_per_dim * n.max(1)
    }

    fn initial_simplex(&self, x0: &[f64], bounds: &Bounds) -> Vec<Vec<f64>> {
        let mut simplex = Vec::with_capacity(x0.len() + 1);
        simplex.push(x0.to_vec());
        for (k, &(lo, hi)) in bounds.ranges().iter().enumerate() {
            let mut vertex = x0.to_vec();
            let step = if x0[k] != 0.0 {
                NONZERO_STEP * x0[k]
            } else {
                ZERO_STEP
            };
            vertex[k] = x0[k] + step;
            // Step the other way rather than collapse onto the upper bound
            if vertex[k] > hi {
                vertex[k] = x0[k] - step;
            }
            vertex[k] = vertex[k].clamp(lo, hi);
            simplex.push(vertex);
        }
        simplex
    }
}

/// `(1 + t)·centroid - t·worst`, clipped.
fn along(centroid: &[f64], worst: &[f64], t: f64, bounds: &Bounds) -> Vec<f64> {
    let mut point: Vec<f64> = centroid
        .iter()
        .zip(worst)
        .map(|(&c, &w)| (1.0 + t) * c - t * w)
        .collect();
    bounds.clip(&mut point);
    point
}

fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

impl Minimizer for NelderMead {
    fn minimize(
        &self,
        loss: &mut dyn FnMut(&[f64]) -> f64,
        initial: &[f64],
        bounds: &Bounds,
    ) -> Minimum {
        let n = initial.len();
        assert_eq!(n, bounds.dim(), "initial point and bounds differ in dimension");
        let max_evaluations = self.max_evaluations(n);
        let mut objective = Objective::new(loss);

        let mut x0 = initial.to_vec();
        bounds.clip(&mut x0);

        let mut simplex = self.initial_simplex(&x0, bounds);
        let mut values: Vec<f64> = simplex.iter().map(|v| objective.eval(v)).collect();
        sort_simplex(&mut simplex, &mut values);

        let mut iterations = 1;
        let mut status = Convergence::BudgetExhausted;

        while objective.evaluations < max_evaluations && iterations < self.max_iterations {
            let extent = simplex[1..]
                .iter()
                .flat_map(|v| v.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
                .fold(0.0, f64::max);
            let spread = values[1..]
                .iter()
                .map(|f| (f - values[0]).abs())
                .fold(0.0, f64::max);
            if extent <= self.xatol && spread <= self.fatol {
                status = Convergence::Converged;
                break;
            }

            let mut centroid = vec![0.0; n];
            for vertex in &simplex[..n] {
                for (c, &v) in centroid.iter_mut().zip(vertex) {
                    *c += v / n as f64;
                }
            }
            let worst = simplex[n].clone();

            let reflected = along(&centroid, &worst, REFLECTION, bounds);
            let f_reflected = objective.eval(&reflected);
            let mut shrink = false;

            if f_reflected < values[0] {
                let expanded = along(&centroid, &worst, REFLECTION * EXPANSION, bounds);
                let f_expanded = objective.eval(&expanded);
                if f_expanded < f_reflected {
                    simplex[n] = expanded;
                    values[n] = f_expanded;
                } else {
                    simplex[n] = reflected;
                    values[n] = f_reflected;
                }
            } else if f_reflected < values[n - 1] {
                simplex[n] = reflected;
                values[n] = f_reflected;
            } else if f_reflected < values[n] {
                let contracted = along(&centroid, &worst, CONTRACTION * REFLECTION, bounds);
                let f_contracted = objective.eval(&contracted);
                if f_contracted <= f_reflected {
                    simplex[n] = contracted;
                    values[n] = f_contracted;
                } else {
                    shrink = true;
                }
            } else {
                let contracted = along(&centroid, &worst, -CONTRACTION, bounds);
                let f_contracted = objective.eval(&contracted);
                if f_contracted < values[n] {
                    simplex[n] = contracted;
                    values[n] = f_contracted;
                } else {
                    shrink = true;
                }
            }

            if shrink {
                let best = simplex[0].clone();
                for j in 1..=n {
                    for (v, &b) in simplex[j].iter_mut().zip(&best) {
                        *v = b + SHRINK * (*v - b);
                    }
                    bounds.clip(&mut simplex[j]);
                    values[j] = objective.eval(&simplex[j]);
                }
            }

            iterations += 1;
            sort_simplex(&mut simplex, &mut values);
        }

        Minimum {
            point: simplex.swap_remove(0),
            value: values[0],
            iterations,
            evaluations: objective.evaluations,
            status,
        }
    }
}
