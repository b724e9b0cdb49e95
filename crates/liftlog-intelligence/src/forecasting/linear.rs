// ABOUTME: Linear trend extrapolation over the week index, the deterministic forecast fallback
// ABOUTME: Bounds are a constant band of one population standard deviation of the history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: week indices are small

use super::{ForecastError, Forecaster, Prediction};
use crate::statistical_analysis::StatisticalAnalyzer;
use liftlog_core::models::ForecastMethod;

/// Fits `y = a * week + b` and extends it
///
/// The band does not widen with distance from the data.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrendForecaster;

impl Forecaster for LinearTrendForecaster {
    fn name(&self) -> &'static str {
        "linear_trend"
    }

    fn predict(&self, values: &[f64], horizon: usize) -> Result<Prediction, ForecastError> {
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }
        let fit = StatisticalAnalyzer::linear_fit(values).map_err(|_| ForecastError::NonFinite)?;
        let spread = StatisticalAnalyzer::population_std_dev(values).unwrap_or(0.0);

        let n = values.len();
        let forecasts: Vec<f64> = (n..n + horizon).map(|x| fit.predict(x as f64)).collect();
        let lower = forecasts.iter().map(|f| f - spread).collect();
        let upper = forecasts.iter().map(|f| f + spread).collect();

        Ok(Prediction {
            method: ForecastMethod::LinearTrend,
            forecasts,
            lower,
            upper,
        })
    }
}
