// ABOUTME: Strength-training analytics engine for logged workout sets
// ABOUTME: Derives metrics, classifies exercises, aggregates series, forecasts 1RM and raises alerts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftlog Intelligence
//!
//! Pure analytics over [`liftlog_core::models::WorkoutSet`] records. Data
//! flows one way: raw sets are enriched by [`MetricDeriver`], grouped by
//! [`AggregationEngine`], and the resulting series feed [`ForecastEngine`]
//! and [`AlertEngine`]. Nothing here performs I/O or holds shared state.

/// Plateau and volume-drop alert heuristics
pub mod alerts;

/// Daily/weekly series, filters and per-exercise summaries
pub mod aggregation;

/// Tunable thresholds with environment overrides
pub mod analysis_config;

/// Keyword-based muscle group classification and display aliases
pub mod classifier;

/// Weekly 1RM forecasting with automatic ARIMA and linear fallback
pub mod forecasting;

/// Volume, Epley 1RM and moving-average trend derivation
pub mod metrics;

/// Regression and descriptive statistics helpers
pub mod statistical_analysis;

pub use aggregation::{AggregationEngine, Reducer, SetFilter, SetMetric, SummaryOrdering};
pub use alerts::{AlertEngine, AlertKind};
pub use analysis_config::{AnalysisConfig, AnalysisConfigError};
pub use classifier::ExerciseClassifier;
pub use forecasting::{ForecastEngine, ForecastError, Forecaster};
pub use metrics::MetricDeriver;
pub use statistical_analysis::StatisticalAnalyzer;
