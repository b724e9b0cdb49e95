// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup plus builders for sets, dates and weekly series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_wrap,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `liftlog`

use chrono::{Duration, NaiveDate};
use liftlog::intelligence::MetricDeriver;
use liftlog::models::{DerivedSet, TimeSeries, WorkoutSet};
use std::collections::BTreeMap;
use std::env;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Calendar date shorthand
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Monday 2024-01-01, the first day of a Sunday-ending week
pub fn first_monday() -> NaiveDate {
    day(2024, 1, 1)
}

/// Strength set in the "Push" routine
pub fn set(date: NaiveDate, exercise: &str, set_number: u32, weight: f64, reps: u32) -> WorkoutSet {
    WorkoutSet::strength(date, "Push", exercise, set_number, Some(weight), Some(reps))
}

/// Derived strength set in the "Push" routine
pub fn derived(
    date: NaiveDate,
    exercise: &str,
    set_number: u32,
    weight: f64,
    reps: u32,
) -> DerivedSet {
    MetricDeriver::derive(set(date, exercise, set_number, weight, reps))
}

/// Weekly series keyed by consecutive Sundays starting 2024-01-07
pub fn weekly(values: &[f64]) -> TimeSeries {
    let first_sunday = day(2024, 1, 7);
    let map: BTreeMap<NaiveDate, f64> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (first_sunday + Duration::weeks(i as i64), v))
        .collect();
    TimeSeries::from_map(map)
}

/// One single-rep set per week (Mondays) whose estimated 1RM follows `one_rms`
///
/// A single rep makes the Epley estimate `weight * (1 + 1/30)`.
pub fn weekly_single_reps(exercise: &str, one_rms: &[f64]) -> Vec<WorkoutSet> {
    one_rms
        .iter()
        .enumerate()
        .map(|(i, &one_rm)| {
            let date = first_monday() + Duration::weeks(i as i64);
            set(date, exercise, 1, one_rm / (1.0 + 1.0 / 30.0), 1)
        })
        .collect()
}
