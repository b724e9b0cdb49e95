// ABOUTME: Weekly estimated-1RM forecasting with a primary model and a deterministic fallback
// ABOUTME: Coordinates forecaster strategies behind one contract that never fails past its boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Forecast Engine
//!
//! A daily 1RM series is resampled to Sunday-ending weeks (weekly maximum)
//! and handed to the primary [`Forecaster`]. Any primary failure is absorbed
//! and the [`LinearTrendForecaster`] answers instead. Too little history
//! yields `None`, meaning "no forecast available".

/// Automatically order-selected ARIMA forecaster
pub mod arima;
/// Least-squares trend forecaster used as fallback
pub mod linear;
/// Bounded Nelder-Mead minimizer for model fitting
pub mod optimizer;

pub use arima::AutoArimaForecaster;
pub use linear::LinearTrendForecaster;

use crate::aggregation::{AggregationEngine, Reducer};
use crate::analysis_config::ForecastConfig;
use chrono::Duration;
use liftlog_core::models::{
    DailySeries, ForecastMethod, ForecastPoint, ForecastResult, WeeklySeries,
};
use std::iter::successors;
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons a forecaster can fail
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    /// Not enough observations for the requested model
    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData {
        /// Observations required
        needed: usize,
        /// Observations available
        got: usize,
    },

    /// Every candidate model was rejected
    #[error("No admissible model: {0}")]
    NoAdmissibleModel(String),

    /// The optimizer hit its iteration cap
    #[error("Optimizer did not converge within {0} iterations")]
    NonConvergence(usize),

    /// The model produced NaN or infinite output
    #[error("Model produced non-finite output")]
    NonFinite,
}

/// Point forecasts with interval bounds, one entry per horizon step
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Strategy that produced the values
    pub method: ForecastMethod,
    /// Point forecasts
    pub forecasts: Vec<f64>,
    /// Lower bounds
    pub lower: Vec<f64>,
    /// Upper bounds
    pub upper: Vec<f64>,
}

impl Prediction {
    fn is_finite(&self) -> bool {
        self.forecasts
            .iter()
            .chain(&self.lower)
            .chain(&self.upper)
            .all(|v| v.is_finite())
    }
}

/// A forecasting strategy over evenly spaced observations
pub trait Forecaster: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Forecast `horizon` steps past the end of `values`
    ///
    /// # Errors
    ///
    /// Returns a `ForecastError` when the strategy cannot produce a forecast
    fn predict(&self, values: &[f64], horizon: usize) -> Result<Prediction, ForecastError>;
}

/// Tries the primary forecaster and falls back to a linear trend
pub struct ForecastEngine {
    primary: Box<dyn Forecaster>,
    fallback: LinearTrendForecaster,
    min_observations: usize,
    horizon_weeks: usize,
}

impl ForecastEngine {
    /// Engine with the automatic ARIMA primary
    #[must_use]
    pub fn new(config: &ForecastConfig) -> Self {
        Self::with_primary(Box::new(AutoArimaForecaster::new(config)), config)
    }

    /// Engine with a custom primary strategy
    #[must_use]
    pub fn with_primary(primary: Box<dyn Forecaster>, config: &ForecastConfig) -> Self {
        Self {
            primary,
            fallback: LinearTrendForecaster,
            min_observations: config.min_observations,
            horizon_weeks: config.horizon_weeks,
        }
    }

    /// Weekly maxima of a daily series, the history the forecast is fitted on
    #[must_use]
    pub fn weekly_history(series: &DailySeries) -> WeeklySeries {
        AggregationEngine::resample_weekly(&series.dropna(), Reducer::Max)
    }

    /// Forecast the configured number of weeks
    #[must_use]
    pub fn forecast(&self, series: &DailySeries) -> Option<ForecastResult> {
        self.forecast_with_horizon(series, self.horizon_weeks)
    }

    /// Forecast `horizon_weeks` weeks after the last observed week
    ///
    /// Returns `None` for a zero horizon, or when there are fewer than the
    /// minimum observations either before or after weekly resampling.
    #[must_use]
    pub fn forecast_with_horizon(
        &self,
        series: &DailySeries,
        horizon_weeks: usize,
    ) -> Option<ForecastResult> {
        if horizon_weeks == 0 {
            debug!("zero forecast horizon requested");
            return None;
        }

        let observed = series.dropna();
        if observed.len() < self.min_observations {
            debug!(
                observations = observed.len(),
                required = self.min_observations,
                "insufficient history for forecast"
            );
            return None;
        }

        let weekly = Self::weekly_history(&observed);
        if weekly.len() < self.min_observations {
            debug!(
                weeks = weekly.len(),
                required = self.min_observations,
                "insufficient weekly history for forecast"
            );
            return None;
        }

        let values = weekly.values();
        let prediction = match self.primary.predict(&values, horizon_weeks) {
            Ok(prediction) if prediction.is_finite() => prediction,
            Ok(_) => {
                debug!(
                    primary = self.primary.name(),
                    error = %ForecastError::NonFinite,
                    "primary forecaster failed, using fallback"
                );
                self.predict_fallback(&values, horizon_weeks)?
            }
            Err(error) => {
                debug!(
                    primary = self.primary.name(),
                    error = %error,
                    "primary forecaster failed, using fallback"
                );
                self.predict_fallback(&values, horizon_weeks)?
            }
        };

        let last_week = weekly.last()?.date;
        let future_weeks = successors(Some(last_week), |week| {
            week.checked_add_signed(Duration::weeks(1))
        })
        .skip(1);
        let points = future_weeks
            .zip(prediction.forecasts.iter().zip(&prediction.lower).zip(&prediction.upper))
            .map(|(week, ((&forecast, &lower), &upper))| ForecastPoint {
                week,
                forecast,
                lower,
                upper,
            })
            .collect();

        Some(ForecastResult {
            method: prediction.method,
            points,
        })
    }

    fn predict_fallback(&self, values: &[f64], horizon: usize) -> Option<Prediction> {
        match self.fallback.predict(values, horizon) {
            Ok(prediction) => Some(prediction),
            Err(error) => {
                warn!(error = %error, "fallback forecaster failed");
                None
            }
        }
    }
}
