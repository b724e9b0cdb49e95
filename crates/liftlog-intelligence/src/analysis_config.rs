// ABOUTME: Configuration-driven thresholds for workout analysis replacing magic numbers
// ABOUTME: Provides type-safe, environment-configurable parameters for every analytics component
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use liftlog_core::constants::{alerts, dashboard, derivation, forecast, naming};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Analysis configuration errors
#[derive(Debug, Error)]
pub enum AnalysisConfigError {
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Trend smoothing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Moving-average window size
    pub window: usize,
}

/// Weekly 1RM forecasting parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Observations required before and after weekly resampling
    pub min_observations: usize,

    /// Number of weeks forecast
    pub horizon_weeks: usize,

    /// Normal quantile used for model intervals
    pub confidence_z: f64,

    /// Largest autoregressive order searched
    pub max_ar_order: usize,

    /// Largest moving-average order searched
    pub max_ma_order: usize,

    /// Largest differencing order searched
    pub max_differencing: usize,

    /// Iteration cap for each candidate fit
    pub max_iterations: usize,
}

/// Alert heuristics parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Trailing weekly points fitted for plateau detection
    pub plateau_lookback: usize,

    /// Minimum weekly points before plateau detection runs
    pub plateau_min_points: usize,

    /// Absolute relative slope below which a plateau is flagged
    pub plateau_slope_threshold: f64,

    /// Weeks in each of the recent and prior volume windows
    pub volume_window_weeks: usize,

    /// Minimum weekly volume points before the drop check runs
    pub volume_min_weeks: usize,

    /// Recent mean must be below this fraction of the prior mean
    pub volume_drop_ratio: f64,
}

/// Listing and naming parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Maximum alias length in characters
    pub alias_max_len: usize,

    /// Exercises in the top-by-volume ranking
    pub top_exercises_limit: usize,

    /// Exercises in shortcut grids and group panels
    pub shortcut_limit: usize,
}

/// Main analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Trend smoothing
    pub trend: TrendConfig,
    /// Weekly 1RM forecasting
    pub forecast: ForecastConfig,
    /// Alert heuristics
    pub alerts: AlertConfig,
    /// Listings and aliases
    pub presentation: PresentationConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend: TrendConfig {
                window: derivation::DEFAULT_TREND_WINDOW,
            },
            forecast: ForecastConfig {
                min_observations: forecast::MIN_OBSERVATIONS,
                horizon_weeks: forecast::DEFAULT_HORIZON_WEEKS,
                confidence_z: forecast::CONFIDENCE_Z,
                max_ar_order: forecast::MAX_AR_ORDER,
                max_ma_order: forecast::MAX_MA_ORDER,
                max_differencing: forecast::MAX_DIFFERENCING,
                max_iterations: forecast::MAX_OPTIMIZER_ITERATIONS,
            },
            alerts: AlertConfig {
                plateau_lookback: alerts::PLATEAU_LOOKBACK_POINTS,
                plateau_min_points: alerts::PLATEAU_MIN_POINTS,
                plateau_slope_threshold: alerts::PLATEAU_SLOPE_THRESHOLD,
                volume_window_weeks: alerts::VOLUME_DROP_WINDOW_WEEKS,
                volume_min_weeks: alerts::VOLUME_DROP_MIN_WEEKS,
                volume_drop_ratio: alerts::VOLUME_DROP_RATIO,
            },
            presentation: PresentationConfig {
                alias_max_len: naming::DEFAULT_ALIAS_MAX_LEN,
                top_exercises_limit: dashboard::TOP_EXERCISES_LIMIT,
                shortcut_limit: dashboard::SHORTCUT_LIMIT,
            },
        }
    }
}

/// Parse an optional environment override, mapping parse failures to `error`
fn env_override<T: FromStr>(
    name: &str,
    error: fn(String) -> AnalysisConfigError,
) -> Result<Option<T>, AnalysisConfigError> {
    match env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| error(name.into())),
        Err(_) => Ok(None),
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    pub fn from_environment() -> Result<Self, AnalysisConfigError> {
        let mut config = Self::default();

        if let Some(window) =
            env_override("LIFTLOG_TREND_WINDOW", AnalysisConfigError::InvalidWindow)?
        {
            config.trend.window = window;
        }

        if let Some(weeks) =
            env_override("LIFTLOG_FORECAST_HORIZON_WEEKS", AnalysisConfigError::InvalidWindow)?
        {
            config.forecast.horizon_weeks = weeks;
        }

        if let Some(count) = env_override(
            "LIFTLOG_FORECAST_MIN_OBSERVATIONS",
            AnalysisConfigError::InvalidWindow,
        )? {
            config.forecast.min_observations = count;
        }

        if let Some(points) =
            env_override("LIFTLOG_PLATEAU_LOOKBACK", AnalysisConfigError::InvalidWindow)?
        {
            config.alerts.plateau_lookback = points;
        }

        if let Some(threshold) = env_override(
            "LIFTLOG_PLATEAU_SLOPE_THRESHOLD",
            AnalysisConfigError::InvalidThreshold,
        )? {
            config.alerts.plateau_slope_threshold = threshold;
        }

        if let Some(ratio) =
            env_override("LIFTLOG_VOLUME_DROP_RATIO", AnalysisConfigError::InvalidThreshold)?
        {
            config.alerts.volume_drop_ratio = ratio;
        }

        if let Some(weeks) = env_override(
            "LIFTLOG_VOLUME_DROP_WINDOW_WEEKS",
            AnalysisConfigError::InvalidWindow,
        )? {
            config.alerts.volume_window_weeks = weeks;
            config.alerts.volume_min_weeks = config.alerts.volume_min_weeks.max(weeks * 2);
        }

        if let Some(len) =
            env_override("LIFTLOG_ALIAS_MAX_LEN", AnalysisConfigError::InvalidWindow)?
        {
            config.presentation.alias_max_len = len;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), AnalysisConfigError> {
        if self.trend.window == 0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "trend window must be > 0".into(),
            ));
        }

        if self.forecast.horizon_weeks == 0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "forecast horizon_weeks must be > 0".into(),
            ));
        }

        if self.forecast.min_observations < 2 {
            return Err(AnalysisConfigError::ValidationFailed(
                "forecast min_observations must be >= 2".into(),
            ));
        }

        if !self.forecast.confidence_z.is_finite() || self.forecast.confidence_z <= 0.0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "forecast confidence_z must be a positive number".into(),
            ));
        }

        if self.forecast.max_iterations == 0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "forecast max_iterations must be > 0".into(),
            ));
        }

        if self.alerts.plateau_lookback < 2 {
            return Err(AnalysisConfigError::ValidationFailed(
                "plateau_lookback must be >= 2".into(),
            ));
        }

        if !self.alerts.plateau_slope_threshold.is_finite()
            || self.alerts.plateau_slope_threshold < 0.0
        {
            return Err(AnalysisConfigError::ValidationFailed(
                "plateau_slope_threshold must be a non-negative number".into(),
            ));
        }

        if !(self.alerts.volume_drop_ratio > 0.0 && self.alerts.volume_drop_ratio <= 1.0) {
            return Err(AnalysisConfigError::ValidationFailed(
                "volume_drop_ratio must be in (0, 1]".into(),
            ));
        }

        if self.alerts.volume_window_weeks == 0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "volume_window_weeks must be > 0".into(),
            ));
        }

        if self.alerts.volume_min_weeks < self.alerts.volume_window_weeks * 2 {
            return Err(AnalysisConfigError::ValidationFailed(format!(
                "volume_min_weeks must be >= {} (two windows)",
                self.alerts.volume_window_weeks * 2
            )));
        }

        if self.presentation.alias_max_len == 0 {
            return Err(AnalysisConfigError::ValidationFailed(
                "alias_max_len must be > 0".into(),
            ));
        }

        Ok(())
    }
}
