// ABOUTME: Derivative-free Nelder-Mead minimizer with a hard iteration cap
// ABOUTME: Used to fit ARMA coefficients by conditional sum of squares
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: simplex dimension is tiny

use super::ForecastError;
use std::cmp::Ordering;

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Result of a successful minimization
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Best point found
    pub point: Vec<f64>,
    /// Objective value at `point`
    pub value: f64,
    /// Iterations used
    pub iterations: usize,
}

/// Nelder-Mead simplex search
#[derive(Debug, Clone, Copy)]
pub struct NelderMead {
    /// Iteration cap; reaching it is a convergence failure
    pub max_iterations: usize,
    /// Offset of the initial simplex vertices from the start point
    pub initial_step: f64,
    /// Relative spread of simplex values treated as converged
    pub tolerance: f64,
}

impl NelderMead {
    /// Minimizer with the given iteration cap and default step and tolerance
    #[must_use]
    pub const fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            initial_step: 0.1,
            tolerance: 1e-10,
        }
    }

    /// Minimize `objective` starting from `start`
    ///
    /// NaN objective values are treated as `+inf`, so callers can reject
    /// inadmissible regions by returning `f64::INFINITY`.
    ///
    /// # Errors
    ///
    /// Returns `NonConvergence` when the iteration cap is reached and
    /// `NonFinite` when no finite value was ever found
    pub fn minimize<F>(&self, objective: F, start: &[f64]) -> Result<Minimum, ForecastError>
    where
        F: Fn(&[f64]) -> f64,
    {
        let eval = |x: &[f64]| {
            let value = objective(x);
            if value.is_nan() {
                f64::INFINITY
            } else {
                value
            }
        };

        let dim = start.len();
        if dim == 0 {
            let value = eval(start);
            if !value.is_finite() {
                return Err(ForecastError::NonFinite);
            }
            return Ok(Minimum {
                point: Vec::new(),
                value,
                iterations: 0,
            });
        }

        let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
        simplex.push((start.to_vec(), eval(start)));
        for axis in 0..dim {
            let mut vertex = start.to_vec();
            vertex[axis] += self.initial_step;
            let value = eval(&vertex);
            simplex.push((vertex, value));
        }

        for iteration in 0..self.max_iterations {
            simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

            let best = simplex[0].1;
            let worst = simplex[dim].1;
            let second_worst = simplex[dim - 1].1;
            if best.is_finite() && (worst - best).abs() <= self.tolerance * (1.0 + best.abs()) {
                let (point, value) = simplex.swap_remove(0);
                return Ok(Minimum {
                    point,
                    value,
                    iterations: iteration,
                });
            }

            let centroid: Vec<f64> = (0..dim)
                .map(|axis| simplex[..dim].iter().map(|(x, _)| x[axis]).sum::<f64>() / dim as f64)
                .collect();
            let towards = |from: &[f64], coefficient: f64| -> Vec<f64> {
                centroid
                    .iter()
                    .zip(from)
                    .map(|(c, x)| coefficient.mul_add(x - c, *c))
                    .collect()
            };

            let reflected = towards(&simplex[dim].0, -REFLECTION);
            let reflected_value = eval(&reflected);

            if reflected_value < best {
                let expanded = towards(&reflected, EXPANSION);
                let expanded_value = eval(&expanded);
                simplex[dim] = if expanded_value < reflected_value {
                    (expanded, expanded_value)
                } else {
                    (reflected, reflected_value)
                };
                continue;
            }

            if reflected_value < second_worst {
                simplex[dim] = (reflected, reflected_value);
                continue;
            }

            let (contracted, limit) = if reflected_value < worst {
                (towards(&reflected, CONTRACTION), reflected_value)
            } else {
                (towards(&simplex[dim].0, CONTRACTION), worst)
            };
            let contracted_value = eval(&contracted);
            if contracted_value < limit {
                simplex[dim] = (contracted, contracted_value);
                continue;
            }

            let anchor = simplex[0].0.clone();
            for vertex in simplex.iter_mut().skip(1) {
                let shrunk: Vec<f64> = anchor
                    .iter()
                    .zip(&vertex.0)
                    .map(|(a, x)| SHRINK.mul_add(x - a, *a))
                    .collect();
                let value = eval(&shrunk);
                *vertex = (shrunk, value);
            }
        }

        Err(ForecastError::NonConvergence(self.max_iterations))
    }
}
