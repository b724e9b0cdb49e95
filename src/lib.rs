// ABOUTME: Main library entry point for liftlog strength-training analytics
// ABOUTME: Wires workout export ingestion, the analytics engine and the dashboard query service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftlog
//!
//! Turns a workout-logging app's CSV export into training analytics:
//! per-set volume and estimated 1RM, muscle-group classification, daily and
//! weekly series, 1RM forecasts and plateau/volume-drop alerts.
//!
//! ## Architecture
//!
//! - **liftlog-core**: errors, data models and named constants
//! - **liftlog-intelligence**: the pure analytics engine
//! - **ingestion**: CSV loading and the explicit export cache
//! - **dashboard**: plain-data queries a presentation layer renders
//!
//! ## Quick Start
//!
//! ```no_run
//! use liftlog::dashboard::{Dashboard, DashboardFilter};
//! use liftlog::ingestion::CsvWorkoutLoader;
//! use liftlog::intelligence::AnalysisConfig;
//! use std::path::Path;
//!
//! # fn main() -> liftlog::errors::AppResult<()> {
//! let sets = CsvWorkoutLoader::new().load_path(Path::new("Exportação CSV.eml"))?;
//! let dashboard = Dashboard::new(sets, AnalysisConfig::default());
//! let overview = dashboard.overview(&DashboardFilter::default());
//! println!("{} training days", overview.metrics.training_days);
//! # Ok(())
//! # }
//! ```

/// Environment configuration for the dashboard and CLI
pub mod config;

/// Plain-data dashboard queries
pub mod dashboard;

/// Workout export loading and caching
pub mod ingestion;

/// Structured logging setup
pub mod logging;

pub use liftlog_core::{constants, errors, models};
pub use liftlog_intelligence as intelligence;
