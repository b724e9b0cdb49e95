// ABOUTME: Per-set training metrics: volume, Epley estimated one-rep max and trend smoothing
// ABOUTME: Layers derived attributes on logged sets without mutating the source records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Per-set metric derivation

use crate::classifier::ExerciseClassifier;
use crate::statistical_analysis::StatisticalAnalyzer;
use liftlog_core::constants::derivation::EPLEY_REPS_DIVISOR;
use liftlog_core::models::{DerivedSet, TimeSeries, WorkoutSet};
use rayon::prelude::*;
use tracing::debug;

/// Treat NaN and infinities as missing
#[inline]
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Computes volume, estimated 1RM and trend lines
pub struct MetricDeriver;

impl MetricDeriver {
    /// `weight * reps`, missing if either operand is missing or not a number
    #[must_use]
    pub fn compute_volume(weight: Option<f64>, reps: Option<u32>) -> Option<f64> {
        let weight = finite(weight)?;
        let reps = reps?;
        Some(weight * f64::from(reps))
    }

    /// Epley estimate `weight * (1 + reps / 30)`
    ///
    /// Missing when weight or reps is missing, or when reps is zero.
    #[must_use]
    pub fn compute_estimated_1rm(weight: Option<f64>, reps: Option<u32>) -> Option<f64> {
        let weight = finite(weight)?;
        let reps = reps.filter(|&r| r > 0)?;
        Some(weight * (1.0 + f64::from(reps) / EPLEY_REPS_DIVISOR))
    }

    /// Moving-average trend of a series, same dates and length as the input
    #[must_use]
    pub fn compute_trend(series: &TimeSeries, window: usize) -> TimeSeries {
        let smoothed = StatisticalAnalyzer::trailing_moving_average(&series.values(), window);
        series.with_values(&smoothed)
    }

    /// Attach derived attributes to one set
    #[must_use]
    pub fn derive(set: WorkoutSet) -> DerivedSet {
        let volume = Self::compute_volume(set.weight, set.reps);
        let estimated_1rm = Self::compute_estimated_1rm(set.weight, set.reps);
        let muscle_group = ExerciseClassifier::classify(&set.exercise);
        DerivedSet {
            set,
            volume,
            estimated_1rm,
            muscle_group,
        }
    }

    /// Derive every set, preserving input order
    #[must_use]
    pub fn derive_all(sets: Vec<WorkoutSet>) -> Vec<DerivedSet> {
        let derived: Vec<DerivedSet> = sets.into_par_iter().map(Self::derive).collect();
        debug!(
            sets = derived.len(),
            with_1rm = derived.iter().filter(|s| s.estimated_1rm.is_some()).count(),
            "derived per-set metrics"
        );
        derived
    }
}
