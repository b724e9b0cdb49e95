// ABOUTME: Unit tests for analysis config functionality
// ABOUTME: Validates defaults, environment overrides and validation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use liftlog::intelligence::{AnalysisConfig, AnalysisConfigError};
use serial_test::serial;
use std::env;

const OVERRIDES: [&str; 8] = [
    "LIFTLOG_TREND_WINDOW",
    "LIFTLOG_FORECAST_HORIZON_WEEKS",
    "LIFTLOG_FORECAST_MIN_OBSERVATIONS",
    "LIFTLOG_PLATEAU_LOOKBACK",
    "LIFTLOG_PLATEAU_SLOPE_THRESHOLD",
    "LIFTLOG_VOLUME_DROP_RATIO",
    "LIFTLOG_VOLUME_DROP_WINDOW_WEEKS",
    "LIFTLOG_ALIAS_MAX_LEN",
];

fn clear_overrides() {
    for name in OVERRIDES {
        env::remove_var(name);
    }
}

#[test]
fn test_default_config_validation() {
    let config = AnalysisConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_thresholds() {
    let config = AnalysisConfig::default();

    assert_eq!(config.trend.window, 5);
    assert_eq!(config.forecast.min_observations, 5);
    assert_eq!(config.forecast.horizon_weeks, 6);
    assert_eq!(config.alerts.plateau_lookback, 8);
    assert_eq!(config.alerts.plateau_min_points, 5);
    assert!((config.alerts.plateau_slope_threshold - 0.01).abs() < f64::EPSILON);
    assert_eq!(config.alerts.volume_window_weeks, 2);
    assert_eq!(config.alerts.volume_min_weeks, 4);
    assert!((config.alerts.volume_drop_ratio - 0.8).abs() < f64::EPSILON);
    assert_eq!(config.presentation.alias_max_len, 16);
}

#[test]
fn test_invalid_values_fail_validation() {
    let mut config = AnalysisConfig::default();
    config.trend.window = 0;
    assert!(config.validate().is_err());

    let mut config = AnalysisConfig::default();
    config.alerts.volume_drop_ratio = 1.5;
    assert!(config.validate().is_err());

    let mut config = AnalysisConfig::default();
    config.forecast.confidence_z = f64::NAN;
    assert!(config.validate().is_err());

    let mut config = AnalysisConfig::default();
    config.alerts.volume_min_weeks = 3;
    assert!(matches!(
        config.validate(),
        Err(AnalysisConfigError::ValidationFailed(_))
    ));
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_overrides();
    env::set_var("LIFTLOG_TREND_WINDOW", "3");
    env::set_var("LIFTLOG_FORECAST_HORIZON_WEEKS", "10");
    env::set_var("LIFTLOG_VOLUME_DROP_RATIO", "0.7");
    env::set_var("LIFTLOG_VOLUME_DROP_WINDOW_WEEKS", "3");

    let config = AnalysisConfig::from_environment().unwrap();
    clear_overrides();

    assert_eq!(config.trend.window, 3);
    assert_eq!(config.forecast.horizon_weeks, 10);
    assert!((config.alerts.volume_drop_ratio - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.alerts.volume_window_weeks, 3);
    assert_eq!(config.alerts.volume_min_weeks, 6);
}

#[test]
#[serial]
fn test_unparseable_override_is_rejected() {
    clear_overrides();
    env::set_var("LIFTLOG_PLATEAU_SLOPE_THRESHOLD", "flat");

    let result = AnalysisConfig::from_environment();
    clear_overrides();

    assert!(matches!(result, Err(AnalysisConfigError::InvalidThreshold(_))));
}

#[test]
#[serial]
fn test_override_failing_validation_is_rejected() {
    clear_overrides();
    env::set_var("LIFTLOG_ALIAS_MAX_LEN", "0");

    let result = AnalysisConfig::from_environment();
    clear_overrides();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_environment_without_overrides_matches_default() {
    clear_overrides();
    let config = AnalysisConfig::from_environment().unwrap();
    assert_eq!(config.trend.window, AnalysisConfig::default().trend.window);
    assert_eq!(
        config.forecast.horizon_weeks,
        AnalysisConfig::default().forecast.horizon_weeks
    );
}
