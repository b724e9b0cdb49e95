// ABOUTME: Statistical helpers behind trend, plateau and fallback forecast calculations
// ABOUTME: Implements least-squares line fitting over an index, means and standard deviation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: series lengths are far below 2^52

use liftlog_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Degree-1 least-squares fit of values against their index `0..n`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Change per index step
    pub slope: f64,
    /// Fitted value at index 0
    pub intercept: f64,
    /// Coefficient of determination (0-1), 0 when the values are constant
    pub r_squared: f64,
}

impl LinearFit {
    /// Fitted value at `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Statistical routines over plain value slices
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Fit `y = slope * x + intercept` with `x = 0, 1, ..., n - 1`
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 values or any value is not finite
    pub fn linear_fit(values: &[f64]) -> AppResult<LinearFit> {
        if values.len() < 2 {
            return Err(AppError::invalid_input(format!(
                "Insufficient data points for regression: need at least 2, got {}",
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AppError::invalid_input(
                "Cannot fit a line through non-finite values",
            ));
        }

        let n = values.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = Self::mean(values).unwrap_or(0.0);

        let (mut sxx, mut sxy, mut syy) = (0.0_f64, 0.0_f64, 0.0_f64);
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            let dy = y - mean_y;
            sxx = dx.mul_add(dx, sxx);
            sxy = dx.mul_add(dy, sxy);
            syy = dy.mul_add(dy, syy);
        }

        let slope = sxy / sxx;
        let intercept = slope.mul_add(-mean_x, mean_y);
        let r_squared = if syy > 0.0 {
            (sxy * sxy) / (sxx * syy)
        } else {
            0.0
        };

        Ok(LinearFit {
            slope,
            intercept,
            r_squared,
        })
    }

    /// Arithmetic mean, `None` for an empty slice
    #[must_use]
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Population standard deviation (divides by `n`), `None` for an empty slice
    #[must_use]
    pub fn population_std_dev(values: &[f64]) -> Option<f64> {
        let mean = Self::mean(values)?;
        let variance = values
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / values.len() as f64;
        Some(variance.sqrt())
    }

    /// Trailing moving average with a shrinking window at the start
    ///
    /// Point `i` averages `values[i + 1 - k..=i]` where `k = min(window, i + 1)`,
    /// so the output has the same length as the input and no leading gaps.
    /// A zero window is treated as 1.
    #[must_use]
    pub fn trailing_moving_average(values: &[f64], window: usize) -> Vec<f64> {
        let window = window.max(1);
        (0..values.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(window);
                let slice = &values[start..=i];
                slice.iter().sum::<f64>() / slice.len() as f64
            })
            .collect()
    }
}
