// ABOUTME: Non-seasonal ARIMA forecaster with automatic order selection
// ABOUTME: Chooses differencing by KPSS test and AR/MA orders by AIC over a bounded grid
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: series lengths and lags are small

//! # Automatic ARIMA
//!
//! 1. Differencing order `d` is raised while a KPSS level-stationarity test
//!    rejects at the 5% level, up to the configured maximum.
//! 2. Every ARMA(p, q) with mean (the drift when `d > 0`) in the grid is fitted
//!    to the differenced series by conditional sum of squares, using a
//!    Nelder-Mead search restricted to stationary and invertible coefficients.
//! 3. The candidate with the lowest AIC forecasts; intervals come from the
//!    model's psi weights, integrated `d` times.

use super::optimizer::NelderMead;
use super::{ForecastError, Forecaster, Prediction};
use crate::analysis_config::ForecastConfig;
use crate::statistical_analysis::StatisticalAnalyzer;
use liftlog_core::models::ForecastMethod;
use std::f64::consts::PI;
use tracing::debug;

/// KPSS level-stationarity critical value at the 5% level
const KPSS_CRITICAL_5PCT: f64 = 0.463;

/// First differences
fn difference(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Running sums
fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// KPSS statistic for level stationarity with Bartlett-weighted long-run variance
#[must_use]
pub fn kpss_statistic(values: &[f64]) -> f64 {
    let Some(mean) = StatisticalAnalyzer::mean(values) else {
        return 0.0;
    };
    let n = values.len();
    let deviations: Vec<f64> = values.iter().map(|v| v - mean).collect();
    let partial_sums = cumulative(&deviations);
    let numerator = partial_sums.iter().map(|s| s * s).sum::<f64>() / (n * n) as f64;

    let lags = ((4.0 * (n as f64 / 100.0).powf(0.25)).floor() as usize).min(n.saturating_sub(1));
    let mut long_run = deviations.iter().map(|e| e * e).sum::<f64>() / n as f64;
    for lag in 1..=lags {
        let weight = 1.0 - lag as f64 / (lags as f64 + 1.0);
        let autocovariance = deviations[lag..]
            .iter()
            .zip(&deviations)
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / n as f64;
        long_run += 2.0 * weight * autocovariance;
    }

    if long_run <= f64::EPSILON * mean.abs().max(1.0) {
        return 0.0;
    }
    numerator / long_run
}

/// Stationarity of `1 - c1 B - ... - cp B^p` via the Durbin-Levinson step-down
fn is_stationary(coefficients: &[f64]) -> bool {
    let mut current = coefficients.to_vec();
    while let Some(&reflection) = current.last() {
        if reflection.is_nan() || reflection.abs() >= 1.0 {
            return false;
        }
        let m = current.len();
        let denominator = reflection.mul_add(-reflection, 1.0);
        current = (0..m - 1)
            .map(|i| reflection.mul_add(current[m - 2 - i], current[i]) / denominator)
            .collect();
    }
    true
}

/// Invertibility of `1 + t1 B + ... + tq B^q`
fn is_invertible(theta: &[f64]) -> bool {
    let negated: Vec<f64> = theta.iter().map(|t| -t).collect();
    is_stationary(&negated)
}

/// Conditional residuals of a zero-mean ARMA(p, q); the first `p` are zero
fn arma_residuals(z: &[f64], phi: &[f64], theta: &[f64]) -> Vec<f64> {
    let p = phi.len();
    let mut residuals = vec![0.0; z.len()];
    for t in p..z.len() {
        let ar: f64 = phi.iter().enumerate().map(|(i, c)| c * z[t - 1 - i]).sum();
        let ma: f64 = theta
            .iter()
            .enumerate()
            .filter(|(j, _)| *j < t)
            .map(|(j, c)| c * residuals[t - 1 - j])
            .sum();
        residuals[t] = z[t] - ar - ma;
    }
    residuals
}

/// Fitted ARIMA(p, d, q) model
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaModel {
    /// Differencing order
    pub d: usize,
    /// Autoregressive coefficients
    pub phi: Vec<f64>,
    /// Moving-average coefficients
    pub theta: Vec<f64>,
    /// Mean of the differenced series
    pub mean: f64,
    /// Innovation variance
    pub sigma2: f64,
    /// Akaike information criterion
    pub aic: f64,
    /// Series at each differencing level, `levels[d]` being the fitted one
    levels: Vec<Vec<f64>>,
    /// Conditional residuals of the fit
    residuals: Vec<f64>,
}

impl ArimaModel {
    /// Forecast method descriptor
    #[must_use]
    pub fn method(&self) -> ForecastMethod {
        ForecastMethod::Arima {
            p: self.phi.len(),
            d: self.d,
            q: self.theta.len(),
        }
    }

    /// Point forecasts and `z`-scaled interval bounds for `horizon` steps
    #[must_use]
    pub fn forecast(&self, horizon: usize, z: f64) -> Prediction {
        let fitted = &self.levels[self.d];
        let n = fitted.len();
        let mut centered: Vec<f64> = fitted.iter().map(|w| w - self.mean).collect();
        let mut shocks = self.residuals.clone();

        let mut differenced_forecast = Vec::with_capacity(horizon);
        for t in n..n + horizon {
            let ar: f64 = self
                .phi
                .iter()
                .enumerate()
                .map(|(i, c)| c * centered[t - 1 - i])
                .sum();
            let ma: f64 = self
                .theta
                .iter()
                .enumerate()
                .filter(|(j, _)| *j < t)
                .map(|(j, c)| c * shocks[t - 1 - j])
                .sum();
            let next = ar + ma;
            centered.push(next);
            shocks.push(0.0);
            differenced_forecast.push(next + self.mean);
        }

        let mut psi = vec![1.0; horizon.min(1)];
        for j in 1..horizon {
            let ma = self.theta.get(j - 1).copied().unwrap_or(0.0);
            let ar: f64 = self
                .phi
                .iter()
                .enumerate()
                .filter(|(i, _)| *i < j)
                .map(|(i, c)| c * psi[j - 1 - i])
                .sum();
            psi.push(ma + ar);
        }

        let mut forecasts = differenced_forecast;
        for level in (0..self.d).rev() {
            let last = self.levels[level].last().copied().unwrap_or(0.0);
            forecasts = cumulative(&forecasts).iter().map(|c| last + c).collect();
            psi = cumulative(&psi);
        }

        let mut variance = 0.0;
        let (mut lower, mut upper) = (Vec::with_capacity(horizon), Vec::with_capacity(horizon));
        for (forecast, weight) in forecasts.iter().zip(&psi) {
            variance = (weight * weight).mul_add(self.sigma2, variance);
            let half_width = z * variance.sqrt();
            lower.push(forecast - half_width);
            upper.push(forecast + half_width);
        }

        Prediction {
            method: self.method(),
            forecasts,
            lower,
            upper,
        }
    }
}

/// ARIMA forecaster searching a bounded order grid
#[derive(Debug, Clone)]
pub struct AutoArimaForecaster {
    max_p: usize,
    max_d: usize,
    max_q: usize,
    confidence_z: f64,
    optimizer: NelderMead,
}

impl AutoArimaForecaster {
    /// Forecaster using the orders, iteration cap and interval width of `config`
    #[must_use]
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            max_p: config.max_ar_order,
            max_d: config.max_differencing,
            max_q: config.max_ma_order,
            confidence_z: config.confidence_z,
            optimizer: NelderMead::new(config.max_iterations),
        }
    }

    /// Differencing order chosen by repeated KPSS tests
    #[must_use]
    pub fn select_differencing(&self, values: &[f64]) -> usize {
        let mut series = values.to_vec();
        let mut d = 0;
        while d < self.max_d && series.len() > 3 && kpss_statistic(&series) > KPSS_CRITICAL_5PCT {
            series = difference(&series);
            d += 1;
        }
        d
    }

    /// Fit ARMA(p, q) with mean to the top level of `levels`
    ///
    /// # Errors
    ///
    /// Returns an error if there are too few points for the order or the fit
    /// does not converge to admissible coefficients
    fn fit_candidate(
        &self,
        levels: &[Vec<f64>],
        p: usize,
        q: usize,
    ) -> Result<ArimaModel, ForecastError> {
        let d = levels.len() - 1;
        let w = &levels[d];
        let parameters = p + q + 2;
        let effective = w.len().saturating_sub(p);
        if effective <= parameters {
            return Err(ForecastError::InsufficientData {
                needed: p + parameters + 1,
                got: w.len(),
            });
        }

        let mean = StatisticalAnalyzer::mean(w).unwrap_or(0.0);
        let centered: Vec<f64> = w.iter().map(|v| v - mean).collect();

        let sum_of_squares = |params: &[f64]| -> f64 {
            let (phi, theta) = params.split_at(p);
            if !is_stationary(phi) || !is_invertible(theta) {
                return f64::INFINITY;
            }
            arma_residuals(&centered, phi, theta)
                .iter()
                .map(|e| e * e)
                .sum()
        };

        let minimum = self
            .optimizer
            .minimize(sum_of_squares, &vec![0.0; p + q])?;
        if !minimum.value.is_finite() {
            return Err(ForecastError::NonFinite);
        }

        let (phi, theta) = minimum.point.split_at(p);
        let scale = centered.iter().map(|c| c * c).sum::<f64>() / w.len() as f64;
        let sigma2 = (minimum.value / effective as f64).max(f64::EPSILON * scale.max(1.0));
        let log_likelihood = -0.5 * effective as f64 * ((2.0 * PI * sigma2).ln() + 1.0);
        let aic = 2.0f64.mul_add(parameters as f64, -2.0 * log_likelihood);

        Ok(ArimaModel {
            d,
            phi: phi.to_vec(),
            theta: theta.to_vec(),
            mean,
            sigma2,
            aic,
            levels: levels.to_vec(),
            residuals: arma_residuals(&centered, phi, theta),
        })
    }

    /// Select and fit the lowest-AIC model
    ///
    /// # Errors
    ///
    /// Returns an error if no candidate order yields an admissible fit
    pub fn fit(&self, values: &[f64]) -> Result<ArimaModel, ForecastError> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::NonFinite);
        }

        let d = self.select_differencing(values);
        let mut levels = vec![values.to_vec()];
        for _ in 0..d {
            let next = levels.last().map(|level| difference(level)).unwrap_or_default();
            levels.push(next);
        }

        let mut best: Option<ArimaModel> = None;
        for p in 0..=self.max_p {
            for q in 0..=self.max_q {
                match self.fit_candidate(&levels, p, q) {
                    Ok(model) if model.aic.is_finite() => {
                        if best.as_ref().is_none_or(|b| model.aic < b.aic) {
                            best = Some(model);
                        }
                    }
                    Ok(_) => debug!(p, d, q, "ARIMA candidate has non-finite AIC"),
                    Err(error) => debug!(p, d, q, error = %error, "ARIMA candidate rejected"),
                }
            }
        }

        let model = best.ok_or_else(|| {
            ForecastError::NoAdmissibleModel(format!(
                "no ARIMA(p,{d},q) candidate fitted {} weekly points",
                values.len()
            ))
        })?;
        debug!(order = ?model.method(), aic = model.aic, "selected ARIMA model");
        Ok(model)
    }
}

impl Forecaster for AutoArimaForecaster {
    fn name(&self) -> &'static str {
        "auto_arima"
    }

    fn predict(&self, values: &[f64], horizon: usize) -> Result<Prediction, ForecastError> {
        let prediction = self.fit(values)?.forecast(horizon, self.confidence_z);
        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(ForecastError::NonFinite)
        }
    }
}
