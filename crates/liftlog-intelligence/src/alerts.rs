// ABOUTME: Plateau and volume-drop heuristics over weekly exercise series
// ABOUTME: Turns triggered conditions into fixed advisory messages for the training report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Alert Engine
//!
//! Both checks treat "not enough data" as "no alert". Neither is a
//! statistical test; results near the thresholds are expected to flip.

use crate::aggregation::{AggregationEngine, Reducer, SetMetric};
use crate::analysis_config::AlertConfig;
use crate::statistical_analysis::StatisticalAnalyzer;
use liftlog_core::constants::alerts::{PLATEAU_MESSAGE, VOLUME_DROP_MESSAGE};
use liftlog_core::models::{DerivedSet, WeeklySeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Condition an alert reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Estimated 1RM stopped progressing
    Plateau,
    /// Weekly volume fell sharply
    VolumeDrop,
}

impl AlertKind {
    /// Advisory text shown for this condition
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Plateau => PLATEAU_MESSAGE,
            Self::VolumeDrop => VOLUME_DROP_MESSAGE,
        }
    }
}

/// Runs the alert heuristics with configurable thresholds
#[derive(Debug, Clone)]
pub struct AlertEngine {
    config: AlertConfig,
}

impl AlertEngine {
    /// Engine using the given thresholds
    #[must_use]
    pub const fn new(config: AlertConfig) -> Self {
        Self { config }
    }

    /// Whether the trailing window of a weekly series is flat
    ///
    /// The slope of a line fitted to the last `plateau_lookback` points is
    /// divided by the window mean when that mean is positive.
    #[must_use]
    pub fn detect_plateau(&self, series: &WeeklySeries) -> bool {
        let lookback = self.config.plateau_lookback;
        let required = self.config.plateau_min_points.max(lookback);
        let values = series.values();
        if values.len() < required {
            return false;
        }

        let window = &values[values.len() - lookback..];
        let Ok(fit) = StatisticalAnalyzer::linear_fit(window) else {
            return false;
        };
        let slope = match StatisticalAnalyzer::mean(window) {
            Some(mean) if mean > 0.0 => fit.slope / mean,
            _ => fit.slope,
        };
        debug!(slope, threshold = self.config.plateau_slope_threshold, "plateau check");
        slope.abs() < self.config.plateau_slope_threshold
    }

    /// Whether the recent weeks' mean volume fell below the drop ratio of the weeks before
    #[must_use]
    pub fn detect_volume_drop(&self, series: &WeeklySeries) -> bool {
        let window = self.config.volume_window_weeks;
        let values: Vec<f64> = series
            .values()
            .into_iter()
            .filter(|v| v.is_finite())
            .collect();
        if window == 0 || values.len() < self.config.volume_min_weeks.max(2 * window) {
            return false;
        }

        let (earlier, recent) = values.split_at(values.len() - window);
        let prior = &earlier[earlier.len() - window..];
        match (
            StatisticalAnalyzer::mean(recent),
            StatisticalAnalyzer::mean(prior),
        ) {
            (Some(recent_mean), Some(prior_mean)) if prior_mean > 0.0 => {
                debug!(recent_mean, prior_mean, "volume drop check");
                recent_mean < self.config.volume_drop_ratio * prior_mean
            }
            _ => false,
        }
    }

    /// Conditions triggered by one exercise's sets, plateau first
    #[must_use]
    pub fn evaluate<'a, I>(&self, exercise_sets: I) -> Vec<AlertKind>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        let sets: Vec<&DerivedSet> = exercise_sets.into_iter().collect();
        let mut kinds = Vec::new();

        let daily_one_rm =
            AggregationEngine::daily_max(sets.iter().copied(), SetMetric::EstimatedOneRepMax);
        if !daily_one_rm.is_empty() {
            let weekly = AggregationEngine::resample_weekly(&daily_one_rm, Reducer::Max);
            if self.detect_plateau(&weekly) {
                kinds.push(AlertKind::Plateau);
            }
        }

        let daily_volume = AggregationEngine::daily_sum(sets.iter().copied(), SetMetric::Volume);
        // Untrained weeks count as zero volume so the windows stay contiguous
        let weekly_volume =
            AggregationEngine::resample_weekly_dense(&daily_volume, Reducer::Sum, 0.0);
        if self.detect_volume_drop(&weekly_volume) {
            kinds.push(AlertKind::VolumeDrop);
        }

        kinds
    }

    /// Advisory messages for one exercise's sets; empty when nothing fired
    #[must_use]
    pub fn generate_alerts<'a, I>(&self, exercise_sets: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a DerivedSet>,
    {
        self.evaluate(exercise_sets)
            .into_iter()
            .map(|kind| kind.message().to_owned())
            .collect()
    }
}
