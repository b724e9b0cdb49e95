// ABOUTME: Unit tests for plateau and volume-drop alert heuristics
// ABOUTME: Validates thresholds, insufficient-data handling and message ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{first_monday, set, weekly, weekly_single_reps};
use liftlog::constants::alerts::{PLATEAU_MESSAGE, VOLUME_DROP_MESSAGE};
use liftlog::intelligence::{AlertEngine, AlertKind, AnalysisConfig, MetricDeriver};
use liftlog::models::WorkoutSet;

fn engine() -> AlertEngine {
    AlertEngine::new(AnalysisConfig::default().alerts)
}

#[test]
fn test_flat_series_is_plateau() {
    let series = weekly(&[100.0; 8]);
    assert!(engine().detect_plateau(&series));
}

#[test]
fn test_rising_series_is_not_plateau() {
    let series = weekly(&[100.0, 105.0, 110.0, 115.0, 120.0, 125.0, 130.0, 135.0]);
    assert!(!engine().detect_plateau(&series));
}

#[test]
fn test_plateau_uses_trailing_window_only() {
    // Strong early progress, then eight flat weeks
    let mut values = vec![60.0, 70.0, 80.0, 90.0];
    values.extend([100.0; 8]);
    assert!(engine().detect_plateau(&weekly(&values)));
}

#[test]
fn test_plateau_needs_full_lookback() {
    assert!(!engine().detect_plateau(&weekly(&[100.0; 7])));
    assert!(!engine().detect_plateau(&weekly(&[])));
}

#[test]
fn test_plateau_threshold_is_relative_to_mean() {
    // Slope 0.5 per week on a ~100 kg lift is 0.5% per week
    let slow = weekly(&[100.0, 100.5, 101.0, 101.5, 102.0, 102.5, 103.0, 103.5]);
    assert!(engine().detect_plateau(&slow));

    // The same absolute slope on a ~10 kg lift is 5% per week
    let light = weekly(&[10.0, 10.5, 11.0, 11.5, 12.0, 12.5, 13.0, 13.5]);
    assert!(!engine().detect_plateau(&light));
}

#[test]
fn test_volume_drop_just_below_ratio() {
    let series = weekly(&[100.0, 100.0, 79.0, 79.0]);
    assert!(engine().detect_volume_drop(&series));
}

#[test]
fn test_volume_drop_at_ratio_is_not_flagged() {
    let series = weekly(&[100.0, 100.0, 80.0, 80.0]);
    assert!(!engine().detect_volume_drop(&series));
}

#[test]
fn test_volume_drop_compares_adjacent_windows() {
    // Only the last four weeks matter
    let series = weekly(&[10.0, 10.0, 100.0, 100.0, 50.0, 50.0]);
    assert!(engine().detect_volume_drop(&series));

    let recovering = weekly(&[500.0, 500.0, 100.0, 100.0, 95.0, 95.0]);
    assert!(!engine().detect_volume_drop(&recovering));
}

#[test]
fn test_volume_drop_needs_four_weeks() {
    assert!(!engine().detect_volume_drop(&weekly(&[100.0, 50.0, 10.0])));
}

#[test]
fn test_volume_drop_skips_zero_prior() {
    assert!(!engine().detect_volume_drop(&weekly(&[0.0, 0.0, 0.0, 0.0])));
}

#[test]
fn test_custom_ratio() {
    let mut config = AnalysisConfig::default().alerts;
    config.volume_drop_ratio = 0.5;
    let engine = AlertEngine::new(config);

    assert!(!engine.detect_volume_drop(&weekly(&[100.0, 100.0, 60.0, 60.0])));
    assert!(engine.detect_volume_drop(&weekly(&[100.0, 100.0, 40.0, 40.0])));
}

#[test]
fn test_messages_are_fixed() {
    assert_eq!(AlertKind::Plateau.message(), PLATEAU_MESSAGE);
    assert_eq!(AlertKind::VolumeDrop.message(), VOLUME_DROP_MESSAGE);
}

#[test]
fn test_generate_alerts_lists_plateau_before_volume_drop() {
    // Flat 1RM for eight weeks; five sets per week, then one set for the last two
    let mut sets: Vec<WorkoutSet> = Vec::new();
    for week in 0..8 {
        let date = first_monday() + Duration::weeks(week);
        let count = if week < 6 { 5 } else { 1 };
        sets.extend((1..=count).map(|n| set(date, "Supino Reto", n, 100.0, 1)));
    }
    let derived = MetricDeriver::derive_all(sets);

    let engine = engine();
    assert_eq!(
        engine.evaluate(&derived),
        vec![AlertKind::Plateau, AlertKind::VolumeDrop]
    );
    assert_eq!(
        engine.generate_alerts(&derived),
        vec![PLATEAU_MESSAGE.to_owned(), VOLUME_DROP_MESSAGE.to_owned()]
    );
}

#[test]
fn test_missed_week_counts_as_zero_volume() {
    // One 100 kg x 10 set in weeks 0-3 and 5; week 4 has no training
    let sets: Vec<WorkoutSet> = [0, 1, 2, 3, 5]
        .into_iter()
        .map(|week| set(first_monday() + Duration::weeks(week), "Remada Curvada", 1, 100.0, 10))
        .collect();
    let derived = MetricDeriver::derive_all(sets);

    assert_eq!(engine().evaluate(&derived), vec![AlertKind::VolumeDrop]);
    assert_eq!(
        engine().generate_alerts(&derived),
        vec![VOLUME_DROP_MESSAGE.to_owned()]
    );
}

#[test]
fn test_zero_volume_week_in_recent_window_is_a_drop() {
    let series = weekly(&[1000.0, 1000.0, 1000.0, 1000.0, 0.0, 1000.0]);
    assert!(engine().detect_volume_drop(&series));
}

#[test]
fn test_progressing_exercise_has_no_alerts() {
    let one_rms: Vec<f64> = (0..10).map(|i| 5.0_f64.mul_add(f64::from(i), 100.0)).collect();
    let derived = MetricDeriver::derive_all(weekly_single_reps("Agachamento", &one_rms));

    assert!(engine().generate_alerts(&derived).is_empty());
}

#[test]
fn test_sets_without_load_have_no_alerts() {
    let derived = MetricDeriver::derive_all(
        (0..8)
            .map(|week| {
                let date = first_monday() + Duration::weeks(week);
                WorkoutSet::strength(date, "Cardio", "Esteira", 1, None, None)
            })
            .collect(),
    );

    assert!(engine().evaluate(&derived).is_empty());
}
